//! Chaining of two script maps.

use std::collections::HashSet;

use sourcemap::{SourceMap, SourceMapBuilder};

use crate::lookup::{mapped_token, source_contents};

/// Chains `transpile` (transpiled script → extracted script) onto `component`
/// (extracted script → component file).
///
/// Each transpiler mapping whose original position traces through
/// `component` is re-emitted against the component file; mappings that do
/// not trace are dropped. Embedded source texts come from `component`, falling
/// back to `transpile` for sources only it knows.
pub fn merge(component: &SourceMap, transpile: &SourceMap) -> SourceMap {
    let mut builder = SourceMapBuilder::new(transpile.get_file().or(component.get_file()));
    let mut with_contents = HashSet::new();

    for token in transpile.tokens() {
        if token.get_source().is_none() {
            continue;
        }
        let Some(traced) = mapped_token(component, token.get_src_line(), token.get_src_col()) else {
            continue;
        };
        let Some(source) = traced.get_source() else {
            continue;
        };
        let src_id = builder.add_source(source);
        if with_contents.insert(src_id) {
            let contents = source_contents(component, source)
                .or_else(|| source_contents(transpile, source));
            builder.set_source_contents(src_id, contents);
        }
        let name_id = traced.get_name().map(|name| builder.add_name(name));
        builder.add_raw(
            token.get_dst_line(),
            token.get_dst_col(),
            traced.get_src_line(),
            traced.get_src_col(),
            Some(src_id),
            name_id,
            false,
        );
    }
    builder.into_sourcemap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::{original_position_for, SourceLocation};

    /// Extracted script lines 1 and 2 come from App.vue lines 9 and 10.
    fn component_map() -> SourceMap {
        let mut builder = SourceMapBuilder::new(None);
        let src = builder.add_source("App.vue");
        builder.set_source_contents(src, Some("<template/>"));
        builder.add_raw(0, 0, 8, 0, Some(src), None, false);
        builder.add_raw(1, 0, 9, 0, Some(src), None, false);
        builder.into_sourcemap()
    }

    #[test]
    fn chains_through_component_map() {
        // transpiled line 3 comes from extracted line 2
        let mut builder = SourceMapBuilder::new(Some("App.vue"));
        let src = builder.add_source("App.vue?script");
        builder.add_raw(2, 2, 1, 0, Some(src), None, false);
        let transpile = builder.into_sourcemap();

        let merged = merge(&component_map(), &transpile);
        assert_eq!(
            original_position_for(&merged, 3, 2),
            Some(SourceLocation::new("App.vue", 10, 0))
        );
        assert_eq!(merged.sources().collect::<Vec<_>>(), ["App.vue"]);
        assert_eq!(merged.get_source_contents(0), Some("<template/>"));
        assert_eq!(merged.get_file(), Some("App.vue"));
    }

    #[test]
    fn untraceable_mappings_are_dropped() {
        let mut builder = SourceMapBuilder::new(None);
        let src = builder.add_source("x");
        builder.add_raw(0, 0, 6, 0, Some(src), None, false);
        builder.add_raw(1, 0, 0, 0, None, None, false);
        let transpile = builder.into_sourcemap();

        let merged = merge(&component_map(), &transpile);
        assert_eq!(merged.get_token_count(), 0);
    }
}
