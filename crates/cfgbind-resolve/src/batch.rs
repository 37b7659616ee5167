//! Many configurations against one table.
use cfgbind_core::Configuration;
use itertools::Itertools;
use rayon::prelude::*;
use tracing::debug;

use crate::{
    config::ResolveOptions,
    emit::{Bindings, emit},
    error::ResolveError,
    logging::LOG_TARGET_BATCH,
    resolver::Resolver,
    table::DefinitionTable,
};

/// `all_configurations` refuses to enumerate more flags than this.
pub const MAX_ENUMERATED_FLAGS: usize = 16;

/// Resolves and emits every configuration independently. Results keep the input order.
pub fn resolve_all(
    table: &DefinitionTable,
    configurations: &[Configuration],
    options: &ResolveOptions,
) -> Vec<Result<Bindings, ResolveError>> {
    let resolver = Resolver::new(options.clone());
    debug!(target: LOG_TARGET_BATCH, configurations = configurations.len(), "starting batch");

    let results: Vec<_> = configurations
        .par_iter()
        .map(|config| resolver.resolve(table, config).and_then(|r| emit(&r)))
        .collect();

    for (config, err) in configurations
        .iter()
        .zip(&results)
        .filter_map(|(c, r)| r.as_ref().err().map(|e| (c, e)))
    {
        debug!(target: LOG_TARGET_BATCH, configuration = %config, error = %err, "configuration failed");
    }
    results
}

/// Every true/false assignment of `flags`, duplicates removed.
///
/// Configurations come out in binary counting order over the sorted flags, the last flag
/// toggling fastest and all-false first.
pub fn all_configurations<I, S>(flags: I) -> Result<Vec<Configuration>, ResolveError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let flags: Vec<String> = flags
        .into_iter()
        .map(|f| f.as_ref().to_string())
        .sorted()
        .dedup()
        .collect();
    if flags.len() > MAX_ENUMERATED_FLAGS {
        return Err(ResolveError::TooManyFlags {
            count: flags.len(),
            limit: MAX_ENUMERATED_FLAGS,
        });
    }

    let n = flags.len();
    Ok((0u32..1 << n)
        .map(|bits| {
            flags
                .iter()
                .enumerate()
                .map(|(i, flag)| (flag.as_str(), bits & (1 << (n - 1 - i)) != 0))
                .collect()
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_sorted_and_deduplicated() {
        let configs = all_configurations(["B", "A", "B"]).unwrap();
        assert_eq!(configs.len(), 4);
        assert_eq!(configs[0], Configuration::new().with("A", false).with("B", false));
        assert_eq!(configs[1], Configuration::new().with("A", false).with("B", true));
        assert_eq!(configs[3], Configuration::defined(["A", "B"]));
    }

    #[test]
    fn no_flags_is_one_empty_configuration() {
        let configs = all_configurations(Vec::<String>::new()).unwrap();
        assert_eq!(configs, vec![Configuration::new()]);
    }

    #[test]
    fn refuses_too_many_flags() {
        let flags: Vec<String> = (0..=MAX_ENUMERATED_FLAGS).map(|i| format!("F{i}")).collect();
        assert_eq!(
            all_configurations(&flags).unwrap_err(),
            ResolveError::TooManyFlags {
                count: MAX_ENUMERATED_FLAGS + 1,
                limit: MAX_ENUMERATED_FLAGS
            }
        );
    }
}
