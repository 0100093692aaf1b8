//! Interactive editor session.
//!
//! Wires one [`Project`], its [`History`], the command [`Interpreter`], and
//! the [`Playback`] machine together, and maps input lines onto the three
//! mutation paths: dot-commands for direct actions and simulated drags, and
//! free text for the interpreter. Every durable mutation saves exactly one
//! history state before control returns to the read loop.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::thread;

use anyhow::{bail, Result};

use carve_command::Interpreter;
use carve_history::{History, Playback, PlaybackState, PLAYBACK_INTERVAL};
use carve_scene::{Node, OpKind, Project, ShapeKind, Transform};

enum Flow {
    Continue,
    Quit,
}

/// Run the interactive editor, optionally opening a project file first.
pub fn run(file: Option<PathBuf>) -> Result<()> {
    let mut session = Session::new();
    if let Some(path) = &file {
        session.load(path, false)?;
        println!("opened {}", path.display());
    }
    println!("carve editor: enter a command, or `.help` for the command list");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match session.dispatch(line) {
            Ok(Flow::Quit) => break,
            Ok(Flow::Continue) => {}
            Err(err) => println!("error: {err:#}"),
        }
    }
    Ok(())
}

struct Session {
    project: Project,
    history: History,
    interpreter: Interpreter,
    playback: Playback,
}

impl Session {
    fn new() -> Self {
        Self {
            project: Project::new(),
            history: History::new(),
            interpreter: Interpreter::new(),
            playback: Playback::new(),
        }
    }

    fn load(&mut self, path: &Path, fresh_history: bool) -> Result<()> {
        let text = std::fs::read_to_string(path)?;
        self.project.import_json(&text)?;
        if fresh_history {
            self.history.clear();
        }
        self.history.save(&self.project)?;
        log::info!(
            "loaded {} ({} nodes, history at {:?})",
            path.display(),
            self.project.store.len(),
            self.history.current_index()
        );
        Ok(())
    }

    fn dispatch(&mut self, line: &str) -> Result<Flow> {
        if !line.starts_with('.') {
            // Free text goes to the interpreter, which saves history itself.
            match self.interpreter.run(line, &mut self.project, &mut self.history) {
                Ok(outcome) => println!("ok: {}", outcome.message),
                Err(err) => println!("error: {}", err),
            }
            return Ok(Flow::Continue);
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts[0] {
            ".help" => self.help(),
            ".add" => self.add(&parts[1..])?,
            ".select" => self.select(&parts[1..])?,
            ".boolean" => self.boolean(&parts[1..])?,
            ".move" => self.move_node(&parts[1..])?,
            ".undo" => match self.history.step_back(&mut self.project)? {
                Some(index) => println!("at state {}", index),
                None => println!("already at the first state"),
            },
            ".redo" => match self.history.step_forward(&mut self.project)? {
                Some(index) => println!("at state {}", index),
                None => println!("already at the last state"),
            },
            ".goto" => self.goto(&parts[1..])?,
            ".history" => self.print_history(),
            ".play" => self.play()?,
            ".tree" => self.print_tree(),
            ".export" => self.export(&parts[1..])?,
            ".import" => self.import(&parts[1..])?,
            ".quit" => return Ok(Flow::Quit),
            other => println!("unknown command `{}`, try `.help`", other),
        }
        Ok(Flow::Continue)
    }

    fn help(&self) {
        println!("free text        e.g. `add box`, `cut sphere radius 2 at 1 0 0`");
        println!(".add <box|sphere>        create a primitive and select it");
        println!(".select <id>             toggle a node in the selection (max 2)");
        println!(".boolean <union|subtract|intersect>   combine the two selected nodes");
        println!(".move <id> <x> <y> <z>   drag a node to a position");
        println!(".undo / .redo            step through history");
        println!(".goto <index>            jump to a history state");
        println!(".history                 list history states");
        println!(".play                    toggle playback over the history");
        println!(".tree                    print the forest");
        println!(".export <path>           write the project JSON");
        println!(".import <path> [--fresh-history]   replace the project");
        println!(".quit                    leave the editor");
    }

    fn add(&mut self, args: &[&str]) -> Result<()> {
        let kind = match args.first().copied() {
            Some("box") => ShapeKind::Box,
            Some("sphere") => ShapeKind::Sphere,
            _ => bail!("usage: .add <box|sphere>"),
        };
        let id = self.project.add_primitive(kind);
        self.project.select_only(&id);
        self.history.save(&self.project)?;
        let name = self.project.node(&id).map(|n| n.name.clone()).unwrap_or_default();
        println!("created `{}` ({})", name, id);
        Ok(())
    }

    fn select(&mut self, args: &[&str]) -> Result<()> {
        let Some(id) = args.first() else {
            bail!("usage: .select <id>");
        };
        if !self.project.store.contains(id) {
            println!("no node `{}`", id);
            return Ok(());
        }
        self.project.toggle_selection(id);
        let names: Vec<String> = self
            .project
            .selected_nodes()
            .iter()
            .map(|n| n.name.clone())
            .collect();
        println!("selected: {}", names.join(", "));
        Ok(())
    }

    fn boolean(&mut self, args: &[&str]) -> Result<()> {
        let op = match args.first().copied() {
            Some("union") => OpKind::Union,
            Some("subtract") => OpKind::Subtract,
            Some("intersect") => OpKind::Intersect,
            _ => bail!("usage: .boolean <union|subtract|intersect>"),
        };
        let selected: Vec<String> = self
            .project
            .selected_nodes()
            .iter()
            .map(|n| n.id.clone())
            .collect();
        let [a, b] = selected.as_slice() else {
            println!("select two nodes first");
            return Ok(());
        };
        let (a, b) = (a.clone(), b.clone());
        match self.project.apply_operation(&a, &b, op) {
            Some(id) => {
                self.project.selection.clear();
                self.project.select_only(&id);
                self.history.save(&self.project)?;
                println!("created `{}`", id);
            }
            None => println!("operation failed: operand not found"),
        }
        Ok(())
    }

    /// Simulated gizmo drag: a transient transform update per step, then
    /// exactly one history save for the drag end.
    fn move_node(&mut self, args: &[&str]) -> Result<()> {
        let [id, x, y, z] = args else {
            bail!("usage: .move <id> <x> <y> <z>");
        };
        let (x, y, z): (f64, f64, f64) = (x.parse()?, y.parse()?, z.parse()?);
        if !self
            .project
            .update_node_transform(id, Transform::translation(x, y, z))
        {
            println!("no node `{}`", id);
            return Ok(());
        }
        self.history.save(&self.project)?;
        println!("moved `{}` to ({}, {}, {})", id, x, y, z);
        Ok(())
    }

    fn goto(&mut self, args: &[&str]) -> Result<()> {
        let Some(raw) = args.first() else {
            bail!("usage: .goto <index>");
        };
        let index: i64 = raw.parse()?;
        if index < 0 {
            println!("history index {} out of range (0..{})", index, self.history.len());
            return Ok(());
        }
        match self.history.restore(index as usize, &mut self.project) {
            Ok(()) => println!("at state {}", index),
            Err(err) => println!("{}", err),
        }
        Ok(())
    }

    fn print_history(&self) {
        if self.history.is_empty() {
            println!("history is empty");
            return;
        }
        let current = self.history.current_index().unwrap_or(0);
        for index in 0..self.history.len() {
            let marker = if index == current { "*" } else { " " };
            println!("{} state {}", marker, index);
        }
    }

    fn play(&mut self) -> Result<()> {
        let state = self.playback.toggle(&mut self.history, &mut self.project)?;
        if state != PlaybackState::Playing {
            println!("playback stopped");
            return Ok(());
        }
        println!("playing {} states", self.history.len());
        while self.playback.is_playing() {
            thread::sleep(PLAYBACK_INTERVAL);
            self.playback.tick(&mut self.history, &mut self.project)?;
            if let Some(index) = self.history.current_index() {
                println!("  state {}", index);
            }
        }
        Ok(())
    }

    fn print_tree(&self) {
        let roots = self.project.store.roots();
        if roots.is_empty() {
            println!("(empty project)");
            return;
        }
        for root in roots {
            self.print_node(root, 0);
        }
    }

    fn print_node(&self, node: &Node, depth: usize) {
        let selected = if self.project.selection.contains(&node.id) {
            " [selected]"
        } else {
            ""
        };
        let label = match node.as_operation() {
            Some(op) => format!("{} ({})", node.name, op.op),
            None => node.name.clone(),
        };
        println!("{}{} ({}){}", "  ".repeat(depth), label, node.id, selected);
        if let Some(op) = node.as_operation() {
            self.print_node(&op.left, depth + 1);
            self.print_node(&op.right, depth + 1);
        }
    }

    fn export(&self, args: &[&str]) -> Result<()> {
        let Some(path) = args.first() else {
            bail!("usage: .export <path>");
        };
        std::fs::write(path, self.project.export_json()?)?;
        println!("exported {} root(s) to {}", self.project.store.roots().len(), path);
        Ok(())
    }

    fn import(&mut self, args: &[&str]) -> Result<()> {
        let Some(path) = args.first() else {
            bail!("usage: .import <path> [--fresh-history]");
        };
        let fresh = args.contains(&"--fresh-history");
        self.load(Path::new(path), fresh)?;
        println!("imported {} ({} nodes)", path, self.project.store.len());
        Ok(())
    }
}
