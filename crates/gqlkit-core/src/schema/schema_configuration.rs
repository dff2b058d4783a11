/// Per-schema settings. Every field has a default, so partial documents
/// deserialize.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct SchemaConfiguration {
    /// Keep parsed documents (and parse failures) in a bounded cache keyed
    /// by the raw document text.
    pub use_caching_document_parser: bool,

    /// Maximum number of documents the parse cache holds.
    pub document_parser_cache_maximum_size: u64,

    /// Coerce a bare value supplied where a list is expected into a
    /// single-element list.
    pub accept_single_value_as_list: bool,

    /// Pretty-print serialized responses.
    pub use_default_pretty_printer: bool,

    /// When `true`, [`Schema::execute()`](crate::schema::Schema::execute)
    /// renders failures as an error envelope instead of returning `Err`.
    pub wrap_errors: bool,

    /// Deadline for executing one request, in milliseconds.
    pub timeout_ms: Option<u64>,
}

impl Default for SchemaConfiguration {
    fn default() -> Self {
        Self {
            use_caching_document_parser: true,
            document_parser_cache_maximum_size: 1000,
            accept_single_value_as_list: true,
            use_default_pretty_printer: false,
            wrap_errors: true,
            timeout_ms: None,
        }
    }
}
