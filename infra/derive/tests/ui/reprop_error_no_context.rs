use reprop_derive::reprop_error;

#[reprop_error]
pub enum ReadFailure {
    Io { source: std::io::Error },
}

fn main() {}
