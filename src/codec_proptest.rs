//! Property-based tests for the document model and the YAML codec.
//!
//! These tests generate random documents and sets and verify that the codec
//! invariants hold for all of them.

#[cfg(test)]
mod proptest_tests {
    use crate::dependencies::{Dependencies, DependencyMap};
    use crate::document::ModuleDocument;
    use crate::string_set::StringSet;
    use crate::yaml::{emit_to_text, parse_from_text};
    use proptest::prelude::*;

    fn identifier() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_.+-]{0,12}"
    }

    fn stream_set() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(identifier(), 0..4)
    }

    fn dependency_map() -> impl Strategy<Value = DependencyMap> {
        prop::collection::vec((identifier(), stream_set()), 0..3).prop_map(|entries| {
            let mut map = DependencyMap::new();
            for (module, streams) in entries {
                map.add_streams(&module, streams);
            }
            map
        })
    }

    fn dependencies() -> impl Strategy<Value = Dependencies> {
        (dependency_map(), dependency_map()).prop_map(|(buildrequires, requires)| {
            let mut deps = Dependencies::new();
            deps.set_buildrequires(&buildrequires);
            deps.set_requires(&requires);
            deps
        })
    }

    fn description() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof!["[A-Za-z][A-Za-z0-9 ,.]{0,24}[A-Za-z0-9.]", Just(String::new())],
            1..5,
        )
        .prop_map(|lines| lines.join("\n"))
        .prop_filter("needs visible text", |text| {
            !text.trim().is_empty() && !text.starts_with('\n')
        })
    }

    prop_compose! {
        fn module_document()(
            mdversion in 1u64..=2,
            name in prop::option::of(identifier()),
            stream in prop::option::of("[a-z0-9][a-z0-9.]{0,8}"),
            version in any::<u64>(),
            summary in "[ -~]{1,40}",
            description in description(),
            module_licenses in stream_set(),
            content_licenses in prop::option::of(stream_set()),
            deps in prop::collection::vec(dependencies(), 0..3),
        ) -> ModuleDocument {
            let mut module = ModuleDocument::new(mdversion);
            module.set_name(name.as_deref());
            module.set_stream(stream.as_deref());
            module.set_version(version);
            module.set_summary(Some(&summary));
            module.set_description(Some(&description));
            module.set_module_licenses(Some(module_licenses.into_iter().collect()));
            module.set_content_licenses(content_licenses.map(|set| set.into_iter().collect()));
            module.set_dependencies(&deps);
            module
        }
    }

    proptest! {
        /// Property: parsing emitted text gives back the same batch
        #[test]
        fn emitted_batch_parses_back_identically(
            batch in prop::collection::vec(module_document(), 0..4)
        ) {
            let yaml = emit_to_text(&batch).unwrap();
            let parsed = parse_from_text(&yaml).unwrap();
            prop_assert_eq!(parsed, batch);
        }

        /// Property: emitting an unchanged batch twice is byte-identical
        #[test]
        fn emission_is_deterministic(module in module_document()) {
            let first = emit_to_text(&[module.clone()]).unwrap();
            let second = emit_to_text(&[module]).unwrap();
            prop_assert_eq!(first, second);
        }

        /// Property: any printable summary survives a round trip
        #[test]
        fn arbitrary_summary_round_trips(summary in "[ -~\u{a0}-\u{2000}]{1,40}") {
            let mut module = ModuleDocument::new(2);
            module.set_summary(Some(&summary));
            module.set_description(Some("A test module."));
            module.module_licenses_mut().add("MIT");

            let parsed = parse_from_text(&emit_to_text(&[module]).unwrap()).unwrap();
            prop_assert_eq!(parsed[0].summary(), Some(summary.as_str()));
        }

        /// Property: any printable description survives a round trip
        #[test]
        fn arbitrary_description_round_trips(text in "[ -~\n]{1,60}") {
            let mut module = ModuleDocument::new(2);
            module.set_summary(Some("Test"));
            module.set_description(Some(&text));
            module.module_licenses_mut().add("MIT");
            prop_assume!(module.description().is_some_and(|d| !d.is_empty()));

            let parsed = parse_from_text(&emit_to_text(&[module.clone()]).unwrap()).unwrap();
            prop_assert_eq!(parsed[0].description(), module.description());
        }

        /// Property: a set serializes as its sorted, deduplicated values
        #[test]
        fn string_set_sequence_is_sorted_and_unique(
            values in prop::collection::vec("[a-z]{0,4}", 0..12)
        ) {
            let set: StringSet = values.iter().cloned().collect();
            let sequence = set.to_ordered_sequence();

            let mut expected = values.clone();
            expected.sort();
            expected.dedup();
            prop_assert_eq!(sequence, expected);
        }

        /// Property: adding an existing value changes nothing
        #[test]
        fn string_set_add_is_idempotent(
            values in prop::collection::vec("[a-z]{1,4}", 1..8)
        ) {
            let mut set: StringSet = values.iter().cloned().collect();
            let before = set.to_ordered_sequence();
            prop_assert!(!set.add(values[0].clone()));
            prop_assert_eq!(set.to_ordered_sequence(), before);
        }

        /// Property: repeated inserts for one module union their streams
        #[test]
        fn dependency_inserts_merge(
            first in stream_set(),
            second in stream_set(),
        ) {
            let mut map = DependencyMap::new();
            map.add_streams("foo", first.iter().map(String::as_str));
            map.add_streams("foo", second.iter().map(String::as_str));

            let expected: StringSet = first.iter().chain(second.iter()).cloned().collect();
            prop_assert_eq!(map.get("foo"), Some(&expected));
            prop_assert_eq!(map.len(), 1);
        }

        /// Property: a copied Dependencies block is independent of its source
        #[test]
        fn dependencies_copy_is_deep(deps in dependencies(), extra in identifier()) {
            let mut copy = None;
            deps.copy(&mut copy);
            let mut copy = copy.unwrap();
            prop_assert_eq!(&copy, &deps);

            copy.add_requires_single("Extra-module", &extra);
            prop_assert!(deps.requires().get("Extra-module").is_none());
        }
    }
}
