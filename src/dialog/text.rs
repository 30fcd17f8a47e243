//! Plain-text fallback when no dialog tool was found

use super::{Adapter, DialogError, Operation};
use crate::backend::Backend;
use crate::platform::Host;

pub struct TextAdapter;

impl Adapter for TextAdapter {
    fn backend(&self) -> Backend {
        Backend::Text
    }

    fn supports(&self, operation: Operation) -> bool {
        operation == Operation::Message
    }

    fn message(&self, _host: &dyn Host, text: &str, title: &str) -> Result<bool, DialogError> {
        println!("{}: {}", title, text);
        Ok(true)
    }
}
