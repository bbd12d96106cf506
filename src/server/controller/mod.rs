//! HTTP request handlers.

pub mod interaction;

#[cfg(test)]
mod test;
