//! Name-based autowiring passes.
//!
//! Two passes run per component: [`autowire_properties`] assigns resolved
//! references onto members whose names match, and [`autowire_parameters`]
//! wraps methods so that resolved references are spliced into every future
//! call at the position the parameter was declared in.
//!
//! Within a pass, all candidates are resolved concurrently and every one of
//! them settles before the pass does. Failures are swallowed unless
//! [`AutowireOptions::fail`] is set, in which case the first failure in
//! declaration order fails the pass.

mod parameters;
mod properties;

pub use parameters::{autowire_method_params, autowire_parameters, splice_args, InjectedArg, ParameterInjector};
pub use properties::autowire_properties;

use crate::error::{AutowireError, AutowireResult};
use crate::options::AutowireOptions;

/// Folds settled candidate outcomes into the pass outcome.
pub(crate) fn settle<I>(options: &AutowireOptions, failures: I) -> AutowireResult<()>
where
    I: IntoIterator<Item = AutowireError>,
{
    let mut first = None;
    for error in failures {
        if !options.fail {
            tracing::debug!(%error, "skipping unresolved candidate");
        } else if first.is_none() {
            first = Some(error);
        } else {
            tracing::warn!(%error, "additional autowiring failure");
        }
    }
    first.map_or(Ok(()), Err)
}
