//! Tests for argument resolution and strategy dispatch

use serde_json::json;
use std::sync::Arc;

use semdi_domain::{vocab, Error, InstantiationSettings};

use crate::support;

#[tokio::test]
async fn leaf_literal_config_builds_a_keyed_instance() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:myLexer", "n3");
    let element = graph.literal("Lexer");
    graph.set_property(config, vocab::REQUIRE_ELEMENT, vec![element]);
    let comments = graph.literal("true");
    let fields = support::fields_object(&graph, &[("comments", comments)]);
    support::set_arguments(&graph, config, vec![fields]);

    let (pool, _) = support::raw_pool(&graph);
    let instance = pool
        .instantiate(config, Arc::new(InstantiationSettings::new()))
        .await
        .unwrap();
    assert_eq!(
        instance,
        json!({"type": "n3.Lexer", "args": [{"comments": "true"}]})
    );
}

#[tokio::test]
async fn non_literal_mapping_keys_are_rejected() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "c");

    let entry = graph.blank();
    let key = graph.named("ex:not-a-literal");
    graph.set_property(entry, vocab::KEY, vec![key]);
    let value = graph.literal("v");
    graph.set_property(entry, vocab::VALUE, vec![value]);
    let fields = graph.blank();
    graph.set_property(fields, vocab::FIELDS, vec![entry]);
    support::set_arguments(&graph, config, vec![fields]);

    let (pool, _) = support::raw_pool(&graph);
    let result = pool
        .instantiate(config, Arc::new(InstantiationSettings::new()))
        .await;
    assert!(matches!(
        result,
        Err(Error::MalformedMappingKey { key, .. }) if key == "ex:not-a-literal"
    ));
}

#[tokio::test]
async fn entries_without_values_are_skipped() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "c");

    let entry = graph.blank();
    let key = graph.literal("dangling");
    graph.set_property(entry, vocab::KEY, vec![key]);
    let fields = graph.blank();
    graph.set_property(fields, vocab::FIELDS, vec![entry]);
    support::set_arguments(&graph, config, vec![fields]);

    let (pool, _) = support::raw_pool(&graph);
    let instance = pool
        .instantiate(config, Arc::new(InstantiationSettings::new()))
        .await
        .unwrap();
    assert_eq!(instance, json!({"type": "c", "args": [{}]}));
}

#[tokio::test]
async fn elements_objects_become_sequences() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "c");

    let elements = graph.blank();
    let a = graph.literal("a");
    let b = graph.literal("b");
    graph.set_property(elements, vocab::ELEMENTS, vec![a, b]);
    support::set_arguments(&graph, config, vec![elements]);

    let (pool, _) = support::raw_pool(&graph);
    let instance = pool
        .instantiate(config, Arc::new(InstantiationSettings::new()))
        .await
        .unwrap();
    assert_eq!(instance, json!({"type": "c", "args": [["a", "b"]]}));
}

#[tokio::test]
async fn rdf_lists_become_sequences_with_native_literals() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "c");

    let one = graph.literal_typed("1", vocab::xsd::INTEGER);
    let two = graph.literal_typed("2", vocab::xsd::INTEGER);
    let list = graph.blank();
    graph.set_list(list, vec![one, two]);
    support::set_arguments(&graph, config, vec![list]);

    let (pool, _) = support::raw_pool(&graph);
    let instance = pool
        .instantiate(config, Arc::new(InstantiationSettings::new()))
        .await
        .unwrap();
    assert_eq!(instance, json!({"type": "c", "args": [[1, 2]]}));
}

#[tokio::test]
async fn variables_in_arguments_resolve_against_settings() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "c");
    let port = graph.variable("port");
    support::set_arguments(&graph, config, vec![port]);

    let (pool, _) = support::raw_pool(&graph);
    let instance = pool
        .instantiate(
            config,
            Arc::new(InstantiationSettings::new().with_variable("port", json!(8080))),
        )
        .await
        .unwrap();
    assert_eq!(instance, json!({"type": "c", "args": [8080]}));
}

#[tokio::test]
async fn unbound_argument_variables_fail() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "c");
    let port = graph.variable("port");
    support::set_arguments(&graph, config, vec![port]);

    let (pool, _) = support::raw_pool(&graph);
    let result = pool
        .instantiate(config, Arc::new(InstantiationSettings::new()))
        .await;
    assert!(matches!(
        result,
        Err(Error::UndefinedVariable { name }) if name == "port"
    ));
}

#[tokio::test]
async fn referenced_configs_are_instantiated_recursively() {
    let graph = support::graph();
    let dependency = support::raw_config(&graph, "ex:dep", "dep");
    let config = support::raw_config(&graph, "ex:config", "c");
    support::set_arguments(&graph, config, vec![dependency]);

    let (pool, strategy) = support::raw_pool(&graph);
    let instance = pool
        .instantiate(config, Arc::new(InstantiationSettings::new()))
        .await
        .unwrap();
    assert_eq!(
        instance,
        json!({"type": "c", "args": [{"type": "dep", "args": []}]})
    );
    assert_eq!(strategy.constructions(), 2);
}

#[tokio::test]
async fn no_constructor_configs_skip_arguments() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "n3");
    let element = graph.literal("Util");
    graph.set_property(config, vocab::REQUIRE_ELEMENT, vec![element]);
    let flag = graph.literal("true");
    graph.set_property(config, vocab::REQUIRE_NO_CONSTRUCTOR, vec![flag]);

    let (pool, _) = support::raw_pool(&graph);
    let instance = pool
        .instantiate(config, Arc::new(InstantiationSettings::new()))
        .await
        .unwrap();
    assert_eq!(instance, json!({"type": "n3.Util", "noConstructor": true}));
}
