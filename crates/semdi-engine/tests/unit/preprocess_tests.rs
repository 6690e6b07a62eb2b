//! Tests for the config preprocessor chain
//!
//! Covers the built-in stages, first-match ordering, and the invariant
//! that validation runs on whatever the chain produces.

use std::sync::Arc;

use semdi_domain::{vocab, Error, ResourceGraph, ResourceId, Result};
use semdi_engine::preprocess::{
    ComponentMappedPreprocessor, ComponentUnmappedPreprocessor, GenericsPreprocessor,
    OverridePreprocessor, ParameterDefaultsPreprocessor,
};
use semdi_engine::{ConfigPreprocessor, PreprocessorChain, Transformed};

use crate::support;

/// A stage that always matches and stamps its own require name
struct StampStage {
    graph: Arc<ResourceGraph>,
    stamp: &'static str,
}

impl ConfigPreprocessor for StampStage {
    type Handle = ();

    fn name(&self) -> &'static str {
        "stamp"
    }

    fn can_handle(&self, _config: ResourceId) -> Result<Option<()>> {
        Ok(Some(()))
    }

    fn transform(&self, config: ResourceId, _handle: ()) -> Result<Transformed> {
        let stamp = self.graph.literal(self.stamp);
        self.graph
            .set_property(config, vocab::REQUIRE_NAME, vec![stamp]);
        Ok(Transformed::finished(config))
    }
}

/// A stage that strips the require name and claims to be done
struct StripStage {
    graph: Arc<ResourceGraph>,
}

impl ConfigPreprocessor for StripStage {
    type Handle = ();

    fn name(&self) -> &'static str {
        "strip"
    }

    fn can_handle(&self, _config: ResourceId) -> Result<Option<()>> {
        Ok(Some(()))
    }

    fn transform(&self, config: ResourceId, _handle: ()) -> Result<Transformed> {
        self.graph.clear_property(config, vocab::REQUIRE_NAME);
        Ok(Transformed::finished(config))
    }
}

#[test]
fn first_matching_stage_wins() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "original");

    let forward = PreprocessorChain::new(graph.clone())
        .with_stage(StampStage {
            graph: graph.clone(),
            stamp: "first",
        })
        .with_stage(StampStage {
            graph: graph.clone(),
            stamp: "second",
        });
    let raw = forward.preprocess(config).unwrap();
    let name = graph.property_first(raw, vocab::REQUIRE_NAME).unwrap();
    assert_eq!(graph.value(name), "first");

    let reversed = PreprocessorChain::new(graph.clone())
        .with_stage(StampStage {
            graph: graph.clone(),
            stamp: "second",
        })
        .with_stage(StampStage {
            graph: graph.clone(),
            stamp: "first",
        });
    let raw = reversed.preprocess(config).unwrap();
    let name = graph.property_first(raw, vocab::REQUIRE_NAME).unwrap();
    assert_eq!(graph.value(name), "second");
}

#[test]
fn validation_runs_on_the_transformed_config() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "present");

    let chain = PreprocessorChain::new(graph.clone()).with_stage(StripStage {
        graph: graph.clone(),
    });
    assert!(matches!(
        chain.preprocess(config),
        Err(Error::InvalidConfig { field, .. }) if field == vocab::REQUIRE_NAME
    ));
}

#[test]
fn unmatched_configs_pass_through_validation() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "n3");
    let chain = PreprocessorChain::new(graph.clone());
    assert_eq!(chain.preprocess(config).unwrap(), config);
}

#[test]
fn non_literal_require_element_is_rejected() {
    let graph = support::graph();
    let config = support::raw_config(&graph, "ex:config", "n3");
    let element = graph.named("ex:not-a-literal");
    graph.set_property(config, vocab::REQUIRE_ELEMENT, vec![element]);

    let chain = PreprocessorChain::new(graph.clone());
    assert!(matches!(
        chain.preprocess(config),
        Err(Error::InvalidConfig { field, .. }) if field == vocab::REQUIRE_ELEMENT
    ));
}

#[test]
fn unmapped_component_lays_out_parameters_in_declaration_order() {
    let graph = support::graph();
    let p_comments = graph.named("ex:comments");
    let p_line_mode = graph.named("ex:lineMode");
    let lexer = support::component(&graph, "ex:Lexer", "n3", &[p_comments, p_line_mode]);
    let module = support::module(&graph, "ex:module", &[lexer]);
    let registry = support::finalized_registry(&graph, module);

    let config = graph.named("ex:myLexer");
    graph.add_type(config, "ex:Lexer");
    let comments = graph.literal("true");
    graph.add_property(config, "ex:comments", comments);
    let line_mode = graph.literal("false");
    graph.add_property(config, "ex:lineMode", line_mode);

    let chain = PreprocessorChain::new(graph.clone())
        .with_stage(ComponentUnmappedPreprocessor::new(graph.clone(), registry));
    let raw = chain.preprocess(config).unwrap();

    let name = graph.property_first(raw, vocab::REQUIRE_NAME).unwrap();
    assert_eq!(graph.value(name), "n3");

    let args = graph
        .list(graph.property_first(raw, vocab::ARGUMENTS).unwrap())
        .unwrap();
    assert_eq!(args.len(), 1);
    let entries = graph.property_values(args[0], vocab::FIELDS);
    let keys: Vec<String> = entries
        .iter()
        .map(|e| graph.value(graph.property_first(*e, vocab::KEY).unwrap()))
        .collect();
    assert_eq!(keys, vec!["ex:comments", "ex:lineMode"]);
    assert_eq!(
        graph.property_first(entries[0], vocab::VALUE),
        Some(comments)
    );
}

#[test]
fn mapped_component_substitutes_parameter_references() {
    let graph = support::graph();
    let p_comments = graph.named("ex:comments");
    let lexer = support::component(&graph, "ex:Lexer", "n3", &[p_comments]);
    let element = graph.literal("Lexer");
    graph.set_property(lexer, vocab::REQUIRE_ELEMENT, vec![element]);

    // constructorArguments: [ { fields: [ { fieldName: "comments", value: ex:comments } ] } ]
    let field = graph.blank();
    let field_name = graph.literal("comments");
    graph.set_property(field, vocab::FIELD_NAME, vec![field_name]);
    graph.set_property(field, vocab::VALUE, vec![p_comments]);
    let mapping = graph.blank();
    graph.add_type(mapping, vocab::OBJECT_MAPPING);
    graph.set_property(mapping, vocab::FIELDS, vec![field]);
    let args = graph.blank();
    graph.set_list(args, vec![mapping]);
    graph.set_property(lexer, vocab::CONSTRUCTOR_ARGUMENTS, vec![args]);

    let module = support::module(&graph, "ex:module", &[lexer]);
    let registry = support::finalized_registry(&graph, module);

    let config = graph.named("ex:myLexer");
    graph.add_type(config, "ex:Lexer");
    let value = graph.literal("true");
    graph.add_property(config, "ex:comments", value);

    let chain = PreprocessorChain::new(graph.clone())
        .with_stage(ComponentMappedPreprocessor::new(graph.clone(), registry));
    let raw = chain.preprocess(config).unwrap();

    let args = graph
        .list(graph.property_first(raw, vocab::ARGUMENTS).unwrap())
        .unwrap();
    assert_eq!(args.len(), 1);
    let entries = graph.property_values(args[0], vocab::FIELDS);
    assert_eq!(entries.len(), 1);
    assert_eq!(
        graph.value(graph.property_first(entries[0], vocab::KEY).unwrap()),
        "comments"
    );
    assert_eq!(graph.property_first(entries[0], vocab::VALUE), Some(value));
}

#[test]
fn mapped_fields_with_unset_parameters_are_omitted() {
    let graph = support::graph();
    let p_opt = graph.named("ex:optional");
    let component = support::component(&graph, "ex:C", "c", &[p_opt]);

    let field = graph.blank();
    let field_name = graph.literal("optional");
    graph.set_property(field, vocab::FIELD_NAME, vec![field_name]);
    graph.set_property(field, vocab::VALUE, vec![p_opt]);
    let mapping = graph.blank();
    graph.add_type(mapping, vocab::OBJECT_MAPPING);
    graph.set_property(mapping, vocab::FIELDS, vec![field]);
    let args = graph.blank();
    graph.set_list(args, vec![mapping]);
    graph.set_property(component, vocab::CONSTRUCTOR_ARGUMENTS, vec![args]);

    let module = support::module(&graph, "ex:module", &[component]);
    let registry = support::finalized_registry(&graph, module);

    let config = graph.named("ex:myC");
    graph.add_type(config, "ex:C");

    let chain = PreprocessorChain::new(graph.clone())
        .with_stage(ComponentMappedPreprocessor::new(graph.clone(), registry));
    let raw = chain.preprocess(config).unwrap();

    let args = graph
        .list(graph.property_first(raw, vocab::ARGUMENTS).unwrap())
        .unwrap();
    assert!(graph.property_values(args[0], vocab::FIELDS).is_empty());
}

#[test]
fn unique_parameters_collapse_to_their_first_value() {
    let graph = support::graph();
    let p_single = graph.named("ex:single");
    let unique = graph.literal("true");
    graph.set_property(p_single, vocab::UNIQUE, vec![unique]);
    let component = support::component(&graph, "ex:C", "c", &[p_single]);
    let module = support::module(&graph, "ex:module", &[component]);
    let registry = support::finalized_registry(&graph, module);

    let config = graph.named("ex:myC");
    graph.add_type(config, "ex:C");
    let first = graph.literal("a");
    let second = graph.literal("b");
    graph.add_property(config, "ex:single", first);
    graph.add_property(config, "ex:single", second);

    let chain = PreprocessorChain::new(graph.clone())
        .with_stage(ComponentUnmappedPreprocessor::new(graph.clone(), registry));
    let raw = chain.preprocess(config).unwrap();

    let args = graph
        .list(graph.property_first(raw, vocab::ARGUMENTS).unwrap())
        .unwrap();
    let entries = graph.property_values(args[0], vocab::FIELDS);
    assert_eq!(graph.property_first(entries[0], vocab::VALUE), Some(first));
}

#[test]
fn parameter_defaults_fill_missing_values_only() {
    let graph = support::graph();
    let p_port = graph.named("ex:port");
    let default = graph.literal("8080");
    graph.set_property(p_port, vocab::DEFAULT, vec![default]);
    let p_host = graph.named("ex:host");
    let host_default = graph.literal("localhost");
    graph.set_property(p_host, vocab::DEFAULT, vec![host_default]);

    let component = support::component(&graph, "ex:Server", "server", &[p_port, p_host]);
    let module = support::module(&graph, "ex:module", &[component]);
    let registry = support::finalized_registry(&graph, module);

    let config = support::raw_config(&graph, "ex:myServer", "server");
    graph.add_type(config, "ex:Server");
    let explicit = graph.literal("example.org");
    graph.add_property(config, "ex:host", explicit);

    let chain = PreprocessorChain::new(graph.clone()).with_stage(
        ParameterDefaultsPreprocessor::new(graph.clone(), registry),
    );
    chain.preprocess(config).unwrap();

    assert_eq!(graph.property_values(config, "ex:port"), vec![default]);
    assert_eq!(graph.property_values(config, "ex:host"), vec![explicit]);
}

#[test]
fn ambiguous_types_without_require_name_are_rejected() {
    let graph = support::graph();
    let a = support::component(&graph, "ex:A", "a", &[]);
    let b = support::component(&graph, "ex:B", "b", &[]);
    let module = support::module(&graph, "ex:module", &[a, b]);
    let registry = support::finalized_registry(&graph, module);

    let config = graph.named("ex:both");
    graph.add_type(config, "ex:A");
    graph.add_type(config, "ex:B");

    let chain = PreprocessorChain::new(graph.clone())
        .with_stage(ComponentUnmappedPreprocessor::new(graph.clone(), registry));
    match chain.preprocess(config) {
        Err(Error::AmbiguousComponentTypes { types, .. }) => {
            assert_eq!(types, vec!["ex:A".to_string(), "ex:B".to_string()]);
        }
        other => panic!("expected AmbiguousComponentTypes, got {other:?}"),
    }
}

#[test]
fn ambiguous_types_with_explicit_require_name_pass_through() {
    let graph = support::graph();
    let a = support::component(&graph, "ex:A", "a", &[]);
    let b = support::component(&graph, "ex:B", "b", &[]);
    let module = support::module(&graph, "ex:module", &[a, b]);
    let registry = support::finalized_registry(&graph, module);

    let config = support::raw_config(&graph, "ex:both", "explicit");
    graph.add_type(config, "ex:A");
    graph.add_type(config, "ex:B");

    let chain = PreprocessorChain::new(graph.clone())
        .with_stage(ComponentUnmappedPreprocessor::new(graph.clone(), registry));
    let raw = chain.preprocess(config).unwrap();
    let name = graph.property_first(raw, vocab::REQUIRE_NAME).unwrap();
    assert_eq!(graph.value(name), "explicit");
}

#[test]
fn generic_type_instances_are_validated_and_consumed() {
    let graph = support::graph();
    let type_param = graph.named("ex:T");
    let component = support::component(&graph, "ex:Container", "container", &[]);
    graph.set_property(component, vocab::GENERIC_TYPE_PARAMETERS, vec![type_param]);
    let module = support::module(&graph, "ex:module", &[component]);
    let registry = support::finalized_registry(&graph, module);

    let config = graph.named("ex:myContainer");
    graph.add_type(config, "ex:Container");
    let concrete = graph.named("ex:Concrete");
    graph.set_property(config, vocab::GENERIC_TYPE_INSTANCES, vec![concrete]);

    let chain = PreprocessorChain::new(graph.clone())
        .with_stage(GenericsPreprocessor::new(graph.clone(), registry.clone()))
        .with_stage(ComponentUnmappedPreprocessor::new(graph.clone(), registry));
    chain.preprocess(config).unwrap();
    assert!(!graph.has_property(config, vocab::GENERIC_TYPE_INSTANCES));
}

#[test]
fn generic_arity_mismatch_is_rejected() {
    let graph = support::graph();
    let type_param = graph.named("ex:T");
    let component = support::component(&graph, "ex:Container", "container", &[]);
    graph.set_property(component, vocab::GENERIC_TYPE_PARAMETERS, vec![type_param]);
    let module = support::module(&graph, "ex:module", &[component]);
    let registry = support::finalized_registry(&graph, module);

    let config = graph.named("ex:myContainer");
    graph.add_type(config, "ex:Container");
    let a = graph.named("ex:A");
    let b = graph.named("ex:B");
    graph.set_property(config, vocab::GENERIC_TYPE_INSTANCES, vec![a, b]);

    let chain = PreprocessorChain::new(graph.clone())
        .with_stage(GenericsPreprocessor::new(graph.clone(), registry));
    assert!(matches!(
        chain.preprocess(config),
        Err(Error::InvalidConfig { field, .. }) if field == vocab::GENERIC_TYPE_INSTANCES
    ));
}

// Override step fixtures

fn override_step(graph: &ResourceGraph, step_type: Option<&str>, parameter: ResourceId) -> ResourceId {
    let step = graph.blank();
    if let Some(step_type) = step_type {
        graph.add_type(step, step_type);
    }
    graph.set_property(step, vocab::OVERRIDE_PARAMETER, vec![parameter]);
    step
}

fn attach_override(graph: &ResourceGraph, config: ResourceId, steps: Vec<ResourceId>) {
    let overriding = graph.blank();
    graph.add_type(overriding, vocab::OVERRIDE);
    graph.set_property(overriding, vocab::OVERRIDE_INSTANCE, vec![config]);
    let list = graph.blank();
    graph.set_list(list, steps);
    graph.set_property(overriding, vocab::OVERRIDE_STEPS, vec![list]);
}

fn list_config(graph: &ResourceGraph) -> (ResourceId, ResourceId, Vec<ResourceId>) {
    let config = support::raw_config(graph, "ex:config", "c");
    let parameter = graph.named("ex:pList");
    let values: Vec<ResourceId> = ["ex:l1", "ex:l2", "ex:l3", "ex:l4"]
        .iter()
        .map(|iri| graph.named(iri))
        .collect();
    graph.set_property(config, "ex:pList", values.clone());
    (config, parameter, values)
}

fn override_chain(graph: &std::sync::Arc<ResourceGraph>) -> PreprocessorChain {
    PreprocessorChain::new(graph.clone())
        .with_stage(OverridePreprocessor::from_graph(graph.clone()))
}

#[test]
fn override_insert_after_splices_after_first_occurrence() {
    let graph = support::graph();
    let (config, parameter, values) = list_config(&graph);

    let step = override_step(&graph, Some(vocab::OVERRIDE_LIST_INSERT_AFTER), parameter);
    graph.set_property(step, vocab::OVERRIDE_TARGET, vec![values[1]]);
    let inserted = graph.named("ex:new");
    graph.set_property(step, vocab::OVERRIDE_VALUE, vec![inserted]);
    attach_override(&graph, config, vec![step]);

    override_chain(&graph).preprocess(config).unwrap();
    assert_eq!(
        graph.property_values(config, "ex:pList"),
        vec![values[0], values[1], inserted, values[2], values[3]]
    );
}

#[test]
fn override_insert_after_splices_list_values_in_order() {
    let graph = support::graph();
    let (config, parameter, values) = list_config(&graph);

    let step = override_step(&graph, Some(vocab::OVERRIDE_LIST_INSERT_AFTER), parameter);
    graph.set_property(step, vocab::OVERRIDE_TARGET, vec![values[3]]);
    let new_a = graph.named("ex:newA");
    let new_b = graph.named("ex:newB");
    let spliced = graph.blank();
    graph.set_list(spliced, vec![new_a, new_b]);
    graph.set_property(step, vocab::OVERRIDE_VALUE, vec![spliced]);
    attach_override(&graph, config, vec![step]);

    override_chain(&graph).preprocess(config).unwrap();
    assert_eq!(
        graph.property_values(config, "ex:pList"),
        vec![values[0], values[1], values[2], values[3], new_a, new_b]
    );
}

#[test]
fn override_insert_before_mirrors_insert_after() {
    let graph = support::graph();
    let (config, parameter, values) = list_config(&graph);

    let step = override_step(&graph, Some(vocab::OVERRIDE_LIST_INSERT_BEFORE), parameter);
    graph.set_property(step, vocab::OVERRIDE_TARGET, vec![values[0]]);
    let inserted = graph.named("ex:new");
    graph.set_property(step, vocab::OVERRIDE_VALUE, vec![inserted]);
    attach_override(&graph, config, vec![step]);

    override_chain(&graph).preprocess(config).unwrap();
    assert_eq!(
        graph.property_values(config, "ex:pList"),
        vec![inserted, values[0], values[1], values[2], values[3]]
    );
}

#[test]
fn override_insert_relative_without_occurrence_fails() {
    let graph = support::graph();
    let (config, parameter, _) = list_config(&graph);

    let step = override_step(&graph, Some(vocab::OVERRIDE_LIST_INSERT_BEFORE), parameter);
    let absent = graph.named("ex:absent");
    graph.set_property(step, vocab::OVERRIDE_TARGET, vec![absent]);
    let inserted = graph.named("ex:new");
    graph.set_property(step, vocab::OVERRIDE_VALUE, vec![inserted]);
    attach_override(&graph, config, vec![step]);

    assert!(matches!(
        override_chain(&graph).preprocess(config),
        Err(Error::OverrideTargetNotFound { parameter, .. }) if parameter == "ex:pList"
    ));
}

#[test]
fn override_insert_at_uses_zero_based_indices() {
    let graph = support::graph();
    let (config, parameter, values) = list_config(&graph);

    let step = override_step(&graph, Some(vocab::OVERRIDE_LIST_INSERT_AT), parameter);
    let index = graph.literal("1");
    graph.set_property(step, vocab::OVERRIDE_TARGET, vec![index]);
    let inserted = graph.named("ex:new");
    graph.set_property(step, vocab::OVERRIDE_VALUE, vec![inserted]);
    attach_override(&graph, config, vec![step]);

    override_chain(&graph).preprocess(config).unwrap();
    assert_eq!(
        graph.property_values(config, "ex:pList"),
        vec![values[0], inserted, values[1], values[2], values[3]]
    );
}

#[test]
fn override_insert_at_out_of_range_fails() {
    let graph = support::graph();
    let (config, parameter, _) = list_config(&graph);

    let step = override_step(&graph, Some(vocab::OVERRIDE_LIST_INSERT_AT), parameter);
    let index = graph.literal("7");
    graph.set_property(step, vocab::OVERRIDE_TARGET, vec![index]);
    let inserted = graph.named("ex:new");
    graph.set_property(step, vocab::OVERRIDE_VALUE, vec![inserted]);
    attach_override(&graph, config, vec![step]);

    assert!(matches!(
        override_chain(&graph).preprocess(config),
        Err(Error::OverrideIndexOutOfRange { index: 7, len: 4, .. })
    ));
}

#[test]
fn override_remove_drops_all_occurrences() {
    let graph = support::graph();
    let (config, parameter, values) = list_config(&graph);

    let step = override_step(&graph, Some(vocab::OVERRIDE_LIST_REMOVE), parameter);
    graph.set_property(step, vocab::OVERRIDE_VALUE, vec![values[1]]);
    attach_override(&graph, config, vec![step]);

    override_chain(&graph).preprocess(config).unwrap();
    assert_eq!(
        graph.property_values(config, "ex:pList"),
        vec![values[0], values[2], values[3]]
    );
}

#[test]
fn override_replace_is_the_default_step() {
    let graph = support::graph();
    let (config, parameter, _) = list_config(&graph);

    let step = override_step(&graph, None, parameter);
    let replacement = graph.named("ex:only");
    graph.set_property(step, vocab::OVERRIDE_VALUE, vec![replacement]);
    attach_override(&graph, config, vec![step]);

    override_chain(&graph).preprocess(config).unwrap();
    assert_eq!(graph.property_values(config, "ex:pList"), vec![replacement]);
}

#[test]
fn override_clear_removes_the_parameter() {
    let graph = support::graph();
    let (config, parameter, _) = list_config(&graph);

    let step = override_step(&graph, Some(vocab::OVERRIDE_CLEAR), parameter);
    attach_override(&graph, config, vec![step]);

    override_chain(&graph).preprocess(config).unwrap();
    assert!(!graph.has_property(config, "ex:pList"));
}

#[test]
fn override_steps_compose_with_component_preprocessing() {
    let graph = support::graph();
    let p_mode = graph.named("ex:mode");
    let component = support::component(&graph, "ex:C", "c", &[p_mode]);
    let module = support::module(&graph, "ex:module", &[component]);
    let registry = support::finalized_registry(&graph, module);

    let config = graph.named("ex:myC");
    graph.add_type(config, "ex:C");
    let original = graph.literal("slow");
    graph.add_property(config, "ex:mode", original);

    let step = override_step(&graph, None, p_mode);
    let replacement = graph.literal("fast");
    graph.set_property(step, vocab::OVERRIDE_VALUE, vec![replacement]);
    attach_override(&graph, config, vec![step]);

    let chain = PreprocessorChain::new(graph.clone())
        .with_stage(OverridePreprocessor::from_graph(graph.clone()))
        .with_stage(ComponentUnmappedPreprocessor::new(graph.clone(), registry));
    let raw = chain.preprocess(config).unwrap();

    let args = graph
        .list(graph.property_first(raw, vocab::ARGUMENTS).unwrap())
        .unwrap();
    let entries = graph.property_values(args[0], vocab::FIELDS);
    assert_eq!(
        graph.property_first(entries[0], vocab::VALUE),
        Some(replacement)
    );
}
