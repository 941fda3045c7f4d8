//! Procedural macros for standby.
//!
//! - `#[derive(Operation)]` - describes a request struct as a proxied operation

use proc_macro::TokenStream;

mod operation;

/// Derive macro for implementing the `Operation` trait.
///
/// The struct's fields are the call arguments. Use the `#[operation(...)]`
/// helper attribute to set the output type (default `()`) and the operation
/// identity (default: the struct name).
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Debug, Operation)]
/// #[operation(name = "sayHello", output = String)]
/// struct SayHello;
/// ```
#[proc_macro_derive(Operation, attributes(operation))]
pub fn derive_operation(input: TokenStream) -> TokenStream {
    operation::derive_operation_impl(input)
}
