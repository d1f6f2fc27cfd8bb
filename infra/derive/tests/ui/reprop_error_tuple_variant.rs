use reprop_derive::reprop_error;

#[reprop_error]
pub enum ParseFailure {
    Parse(std::num::ParseIntError),
}

fn main() {}
