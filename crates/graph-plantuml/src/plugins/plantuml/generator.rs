//! PlantUML script generator
//!
//! Assembles formatted vertices, clusters and relationship edges into a
//! complete `@startuml` … `@enduml` script, and drives the PlantUML command
//! to render it.

use anyhow::{Context, Result};
use indexmap::IndexMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info, span, trace, warn, Level};

use super::encoding::encode;
use super::formatter::DefaultFormatter;
use crate::core::{
    replace_namespace_separator, Attributes, Edge, Formatter, FormatterOptions, Generator,
    GeneratorError, Graph, Vertex, DEFAULT_GROUP, NAMESPACE_DELIMITER,
};

/// Default PlantUML invocation
pub const DEFAULT_EXECUTABLE: &str = "java -jar plantuml.jar";

/// Default output format
pub const DEFAULT_FORMAT: &str = "png";

/// Default command template for [`Generator::write_image_file`]
pub const DEFAULT_COMMAND: &str = "{executable} -t{format} {temp_file} -filename {output_file}";

const START_MARKER: &str = "@startuml";
const END_MARKER: &str = "@enduml";
const REALIZATION: &str = "..|>";
const GENERALIZATION: &str = "--|>";

/// Generator producing PlantUML class diagrams
#[derive(Debug, Clone)]
pub struct PlantUmlGenerator {
    formatter: DefaultFormatter,
    executable: String,
    format: String,
}

impl PlantUmlGenerator {
    pub fn new() -> Self {
        Self::with_options(FormatterOptions::default())
    }

    pub fn with_options(options: FormatterOptions) -> Self {
        Self {
            formatter: DefaultFormatter::new(options),
            executable: DEFAULT_EXECUTABLE.to_string(),
            format: DEFAULT_FORMAT.to_string(),
        }
    }

    /// Command used to start PlantUML, e.g. `/opt/bin/plantuml` or `java -jar plantuml.jar`
    pub fn with_executable(mut self, executable: impl Into<String>) -> Self {
        self.executable = executable.into();
        self
    }

    /// Output format passed to PlantUML (`png`, `svg`, `txt`, …)
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn image_format(&self) -> &str {
        &self.format
    }

    fn options(&self) -> &FormatterOptions {
        self.formatter.options()
    }

    /// Global layout directives derived from `graph.*` attributes
    fn layout_directives(&self, graph: &Graph) -> Vec<String> {
        let layout = graph.attributes.prefixed("graph.");
        let mut directives = Vec::new();

        if let Some(bgcolor) = layout.get("bgcolor") {
            let color = bgcolor.trim_start_matches('#');
            let hash = if color.eq_ignore_ascii_case("transparent") {
                ""
            } else {
                "#"
            };
            directives.push(format!("skinparam backgroundColor {}{}", hash, color));
        }

        if let Some(rankdir) = layout.get("rankdir") {
            // BT and RL have no PlantUML equivalent
            if rankdir.eq_ignore_ascii_case("LR") {
                directives.push("left to right direction".to_string());
            } else if rankdir.eq_ignore_ascii_case("TB") {
                directives.push("top to bottom direction".to_string());
            } else {
                debug!(rankdir, "Ignoring unsupported rank direction");
            }
        }

        directives
    }

    /// Cluster attributes, looked up by group name first, then by index
    fn cluster_layout(&self, graph: &Graph, group: &str, index: usize) -> Attributes {
        [group.to_string(), index.to_string()]
            .iter()
            .map(|cluster| graph.attributes.prefixed(&format!("cluster.{}.graph.", cluster)))
            .find(|layout| !layout.is_empty())
            .unwrap_or_default()
    }

    fn vertex_label(&self, vertex: &Vertex) -> String {
        let indent = &self.options().indent_string;
        let eol = &self.options().line_terminator;
        let stereotype = vertex.attributes.get_or("stereotype", "class");
        let short_name = vertex.id().rsplit(NAMESPACE_DELIMITER).next().unwrap_or_default();
        let members = vertex
            .attributes
            .get(&self.formatter.label_key())
            .unwrap_or_default();

        format!(
            "{indent}{stereotype} {short_name} << {stereotype} >> {{{eol}{members}{indent}}}"
        )
    }

    fn edge_label(&self, graph: &Graph, edge: &Edge) -> String {
        let separator = &self.options().namespace_separator;
        let operator = if edge.is_dashed() {
            REALIZATION
        } else {
            GENERALIZATION
        };

        match graph.endpoints(edge) {
            Some((start, end)) => format!(
                "{} {} {}",
                replace_namespace_separator(start.id(), separator),
                operator,
                replace_namespace_separator(end.id(), separator)
            ),
            None => {
                warn!(start = edge.start, end = edge.end, "Edge points outside the graph");
                String::new()
            }
        }
    }

    /// Tokens of the command that renders `temp_file` into `output_file`
    fn command_tokens(&self, template: &str, temp_file: &Path, output_file: &Path) -> Vec<String> {
        let temp_file = temp_file.to_string_lossy();
        let output_file = output_file.to_string_lossy();

        template
            .split_whitespace()
            .flat_map(|token| {
                if token == "{executable}" {
                    self.executable
                        .split_whitespace()
                        .map(str::to_string)
                        .collect::<Vec<_>>()
                } else {
                    vec![token
                        .replace("{executable}", &self.executable)
                        .replace("{format}", &self.format)
                        .replace("{temp_file}", &temp_file)
                        .replace("{output_file}", &output_file)]
                }
            })
            .collect()
    }
}

impl Default for PlantUmlGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for PlantUmlGenerator {
    type Formatter = DefaultFormatter;

    fn formatter(&self) -> &DefaultFormatter {
        &self.formatter
    }

    fn build_script(&self, graph: &Graph, encode_script: bool) -> String {
        let build_span = span!(
            Level::INFO,
            "build_script",
            vertices = graph.vertex_count(),
            edges = graph.edge_count()
        );
        let _enter = build_span.enter();

        let mut groups: IndexMap<&str, Vec<&Vertex>> = IndexMap::new();
        for vertex in graph.vertices() {
            groups.entry(vertex.group()).or_default().push(vertex);
        }
        let clustered = groups.keys().any(|group| *group != DEFAULT_GROUP);
        debug!(groups = groups.len(), clustered, "Partitioned vertices");

        let mut script = vec![START_MARKER.to_string()];
        script.extend(self.layout_directives(graph));

        if clustered {
            let separator = &self.options().namespace_separator;
            for (index, (group, vertices)) in groups.iter().enumerate() {
                let layout = self.cluster_layout(graph, group, index);
                let bgcolor = match layout.get("bgcolor") {
                    Some(color) if !color.is_empty() => {
                        format!(" #{}", color.trim_start_matches('#'))
                    }
                    _ => String::new(),
                };
                trace!(group, index, members = vertices.len(), "Emitting cluster");

                script.push(format!(
                    "namespace {}{} {{",
                    replace_namespace_separator(group, separator),
                    bgcolor
                ));
                script.extend(vertices.iter().map(|vertex| self.vertex_label(vertex)));
                script.push("}".to_string());
            }
        } else {
            script.extend(graph.vertices().map(|vertex| self.vertex_label(vertex)));
        }

        script.extend(graph.edges().map(|edge| self.edge_label(graph, edge)));

        script.push(END_MARKER.to_string());
        script.push(String::new());

        let text = script.join(&self.options().line_terminator);
        if !encode_script {
            return text;
        }

        match encode(&text) {
            Ok(encoded) => encoded,
            Err(e) => {
                warn!(error = %e, "Encoding failed, returning plain script");
                text
            }
        }
    }

    fn write_image_file(&self, graph: &Graph, command: Option<&str>) -> Result<PathBuf> {
        let image_span = span!(Level::INFO, "write_image_file", format = %self.format);
        let _enter = image_span.enter();

        let script = self.build_script(graph, false);

        let mut temp_file = tempfile::Builder::new()
            .prefix("graph-plantuml")
            .suffix(".puml")
            .tempfile()
            .map_err(GeneratorError::from)?;
        temp_file
            .write_all(script.as_bytes())
            .map_err(GeneratorError::from)?;
        temp_file.flush().map_err(GeneratorError::from)?;

        let output_file = temp_file.path().with_extension(&self.format);
        let tokens = self.command_tokens(
            command.unwrap_or(DEFAULT_COMMAND),
            temp_file.path(),
            &output_file,
        );
        let (program, args) = tokens.split_first().ok_or(GeneratorError::EmptyCommand)?;
        let command_line = tokens.join(" ");
        debug!(command = %command_line, "Running PlantUML");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(GeneratorError::from)
            .with_context(|| format!("Failed to start `{}`", program))?;

        if !output.status.success() {
            return Err(GeneratorError::command_failed(
                command_line,
                output.status.to_string(),
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            )
            .into());
        }

        if !output_file.exists() {
            return Err(GeneratorError::MissingOutput { path: output_file }.into());
        }

        info!(path = %output_file.display(), "Image file written");
        Ok(output_file)
    }

    fn name(&self) -> &'static str {
        "plantuml"
    }
}
