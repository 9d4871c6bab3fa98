pub mod gold_page;
pub mod page_source;
pub mod telegram;

#[cfg(test)]
pub(crate) mod test_server;
