pub(crate) mod after_parsing;
