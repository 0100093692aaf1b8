//! Natural-language-like command interpreter for the carve editor.
//!
//! Commands are single lines of the form
//! `<verb> [shape] [radius <n>] [at <x> <y> <z>]`, case-insensitive and
//! whitespace-tolerant. The first token picks the action from a fixed verb
//! table (with synonyms); the remaining tokens are scanned once for
//! recognized parameter keys. Execution always creates a primitive first;
//! boolean verbs then combine it with the most recently created other root.
//!
//! Every successful command triggers exactly one history save.

use std::collections::HashMap;

use thiserror::Error;

use carve_history::{History, HistoryError};
use carve_scene::{NodeId, NodeKind, OpKind, Project, Shape, ShapeKind, Transform};

/// Errors produced while parsing or executing a command. None of them
/// mutate project state.
#[derive(Error, Debug)]
pub enum CommandError {
    /// The input contained no tokens.
    #[error("empty command")]
    Empty,

    /// The first token is not in the verb table.
    #[error("unrecognized command `{0}`")]
    UnknownVerb(String),

    /// No shape keyword (box or sphere) was found.
    #[error("no shape specified (box or sphere)")]
    MissingShape,

    /// The post-mutation history save failed.
    #[error(transparent)]
    History(#[from] HistoryError),
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// What a successful command did.
#[derive(Debug)]
pub struct Outcome {
    /// Human-readable summary for the UI status line.
    pub message: String,
    /// Id of the primitive the command created.
    pub created: NodeId,
    /// Id of the operation node, when a boolean verb found a target.
    pub operation: Option<NodeId>,
}

/// The action a verb resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Create,
    Boolean(OpKind),
}

/// Parameters recognized during the single-pass token scan.
#[derive(Debug, Default)]
struct Params {
    shape: Option<ShapeKind>,
    radius: Option<f64>,
    position: Option<[f64; 3]>,
}

/// Tokenizing interpreter with a fixed verb table.
#[derive(Debug)]
pub struct Interpreter {
    verbs: HashMap<&'static str, Action>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Build the interpreter with the standard verb table.
    pub fn new() -> Self {
        let verbs = HashMap::from([
            ("add", Action::Create),
            ("create", Action::Create),
            ("subtract", Action::Boolean(OpKind::Subtract)),
            ("cut", Action::Boolean(OpKind::Subtract)),
            ("union", Action::Boolean(OpKind::Union)),
            ("join", Action::Boolean(OpKind::Union)),
            ("intersect", Action::Boolean(OpKind::Intersect)),
        ]);
        Self { verbs }
    }

    /// Parse and execute one command line against the project, saving a
    /// history state on success.
    pub fn run(
        &self,
        input: &str,
        project: &mut Project,
        history: &mut History,
    ) -> Result<Outcome> {
        let lowered = input.trim().to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();
        let Some(&verb) = tokens.first() else {
            return Err(CommandError::Empty);
        };
        let action = *self
            .verbs
            .get(verb)
            .ok_or_else(|| CommandError::UnknownVerb(verb.to_string()))?;

        let params = extract_params(&tokens[1..]);
        let shape = params.shape.ok_or(CommandError::MissingShape)?;
        log::debug!("command `{}` -> {:?} {:?}", input.trim(), action, params);

        let created = project.add_primitive(shape);
        if let Some(radius) = params.radius {
            if let Some(node) = project.node_mut(&created) {
                if let NodeKind::Primitive(Shape::Sphere(sphere)) = &mut node.kind {
                    sphere.radius = radius;
                }
            }
        }
        if let Some([x, y, z]) = params.position {
            // Replaces the transform outright rather than composing.
            project.update_node_transform(&created, Transform::translation(x, y, z));
        }

        let created_name = project
            .node(&created)
            .map(|n| n.name.clone())
            .unwrap_or_else(|| created.clone());
        let mut message = format!("created {} `{}`", shape.keyword(), created_name);

        let mut operation = None;
        if let Action::Boolean(op) = action {
            match project.last_root_excluding(&created) {
                Some(target) => {
                    let target_id = target.id.clone();
                    let target_name = target.name.clone();
                    operation = project.apply_operation(&target_id, &created, op);
                    message.push_str(&format!(" and applied {} with `{}`", op, target_name));
                }
                None => {
                    message.push_str(&format!(" (no other root to {} with)", op));
                }
            }
        }

        history.save(project)?;
        Ok(Outcome {
            message,
            created,
            operation,
        })
    }
}

/// Single scan over the parameter tokens. A `radius` with an unparseable
/// number counts as not provided; `at` needs all three numbers or the
/// position is ignored.
fn extract_params(tokens: &[&str]) -> Params {
    let mut params = Params::default();
    for (i, token) in tokens.iter().enumerate() {
        match *token {
            "box" | "cube" => params.shape = Some(ShapeKind::Box),
            "sphere" | "ball" => params.shape = Some(ShapeKind::Sphere),
            "radius" => {
                if let Some(value) = tokens.get(i + 1).and_then(|t| t.parse().ok()) {
                    params.radius = Some(value);
                }
            }
            "at" => {
                let coords: Vec<f64> = tokens[i + 1..]
                    .iter()
                    .take(3)
                    .filter_map(|t| t.parse().ok())
                    .collect();
                if let [x, y, z] = coords[..] {
                    params.position = Some([x, y, z]);
                }
            }
            _ => {}
        }
    }
    params
}
