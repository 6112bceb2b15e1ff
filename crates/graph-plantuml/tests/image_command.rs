//! Tests for driving the external rendering command
//!
//! A shell utility stands in for PlantUML, so these only run on unix.

#![cfg(unix)]

use graph_plantuml::prelude::*;
use graph_plantuml::GeneratorError;
use std::fs;

fn sample_graph(generator: &PlantUmlGenerator) -> Graph {
    let mut builder = GraphBuilder::new(generator);
    builder.add_declaration(&Declaration::class("B").with_parent(Declaration::class("A")));
    builder.into_graph()
}

#[test]
fn test_write_image_file_runs_command() {
    let generator = PlantUmlGenerator::new()
        .with_executable("cp")
        .with_format("txt");
    let graph = sample_graph(&generator);

    let path = generator
        .write_image_file(&graph, Some("{executable} {temp_file} {output_file}"))
        .unwrap();

    assert_eq!(path.extension().and_then(|e| e.to_str()), Some("txt"));
    let written = fs::read_to_string(&path).unwrap();
    assert_eq!(written, generator.build_script(&graph, false));
    fs::remove_file(path).unwrap();
}

#[test]
fn test_write_image_file_reports_failing_command() {
    let generator = PlantUmlGenerator::new().with_executable("false");
    let graph = sample_graph(&generator);

    let error = generator
        .write_image_file(&graph, Some("{executable}"))
        .unwrap_err();
    let generator_error = error.downcast_ref::<GeneratorError>().unwrap();
    assert!(matches!(generator_error, GeneratorError::CommandFailed { .. }));
}

#[test]
fn test_write_image_file_reports_missing_output() {
    let generator = PlantUmlGenerator::new().with_executable("true");
    let graph = sample_graph(&generator);

    let error = generator
        .write_image_file(&graph, Some("{executable} {temp_file}"))
        .unwrap_err();
    let generator_error = error.downcast_ref::<GeneratorError>().unwrap();
    assert!(matches!(generator_error, GeneratorError::MissingOutput { .. }));
}

#[test]
fn test_write_image_file_reports_missing_executable() {
    let generator = PlantUmlGenerator::new().with_executable("graph-plantuml-no-such-binary");
    let graph = sample_graph(&generator);

    let result = generator.write_image_file(&graph, None);
    assert!(result.is_err());
}

#[test]
fn test_write_image_file_rejects_empty_command() {
    let generator = PlantUmlGenerator::new();
    let graph = sample_graph(&generator);

    let error = generator.write_image_file(&graph, Some("   ")).unwrap_err();
    assert!(matches!(
        error.downcast_ref::<GeneratorError>(),
        Some(GeneratorError::EmptyCommand)
    ));
}
