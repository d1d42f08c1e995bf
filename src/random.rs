pub(crate) mod mt;
