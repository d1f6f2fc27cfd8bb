use reprop_derive::reprop_error;

#[reprop_error]
pub enum LookupFailure {
    Missing { message: String, context: Option<String> },
}

fn main() {}
