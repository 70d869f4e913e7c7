mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)]
// ============================================================================

/// Derive macro implementing `pricebook::Record` for a struct.
///
/// The struct needs an id field plus `created_at: i64` and `updated_at: i64`.
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(collection = "products")]
/// struct Product {
///     #[record(id)]
///     id: String,
///     name: String,
///     created_at: i64,
///     updated_at: i64,
/// }
/// ```
///
/// - `collection` defaults to the snake_case type name plus `s`.
/// - The id field defaults to a field named `id`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
