// File: crates/stock-core/src/bindings.rs
// Summary: Tool bindings and the pointer-driven state machine that builds annotations from them.
// Notes:
// - A binding with no steps commits on its first click; otherwise the first click starts
//   the shape and each step needs one more click.
// - Selecting another tool or deselecting mid-gesture drops the partial shape.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::annotation::{Annotation, ControlPoint};
use crate::error::{ChartError, Result};
use crate::series::SeriesKind;

/// One additional click a multi-step tool requires.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepDescriptor {
    /// What the click positions, e.g. "end point" or "radius".
    pub label: Option<String>,
}

impl StepDescriptor {
    pub fn labeled(label: &str) -> Self {
        Self { label: Some(label.to_string()) }
    }
}

/// Immediate effect of selecting a non-drawing binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingAction {
    ToggleAnnotations,
    SeriesType(SeriesKind),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ToolBinding {
    pub steps: Vec<StepDescriptor>,
    /// Stay armed after a commit instead of returning to idle.
    pub keep_selected: bool,
    pub action: Option<BindingAction>,
}

impl ToolBinding {
    pub fn one_shot() -> Self {
        Self::default()
    }

    pub fn with_steps(labels: &[&str]) -> Self {
        Self {
            steps: labels.iter().map(|l| StepDescriptor::labeled(l)).collect(),
            ..Self::default()
        }
    }

    pub fn action(action: BindingAction) -> Self {
        Self { action: Some(action), ..Self::default() }
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn is_one_shot(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Built-in stock tools.
pub fn stock_tools() -> BTreeMap<String, ToolBinding> {
    let mut tools = BTreeMap::new();
    let mut add = |name: &str, binding: ToolBinding| {
        tools.insert(name.to_string(), binding);
    };

    for name in [
        "label-annotation",
        "vertical-line",
        "horizontal-line",
        "vertical-counter",
        "vertical-label",
        "vertical-arrow",
    ] {
        add(name, ToolBinding::one_shot());
    }

    add("circle-annotation", ToolBinding::with_steps(&["radius"]));
    add("rectangle-annotation", ToolBinding::with_steps(&["corner"]));
    for name in [
        "segment",
        "arrow-segment",
        "ray",
        "arrow-ray",
        "infinity-line",
        "arrow-infinity-line",
        "measure",
    ] {
        add(name, ToolBinding::with_steps(&["end point"]));
    }
    add("crooked3", ToolBinding::with_steps(&["point 2", "point 3"]));
    add("crooked5", ToolBinding::with_steps(&["point 2", "point 3", "point 4", "point 5"]));
    add("elliott3", ToolBinding::with_steps(&["wave 1", "wave 2", "wave 3"]));
    add("elliott5", ToolBinding::with_steps(&["wave 1", "wave 2", "wave 3", "wave 4", "wave 5"]));
    add("pitchfork", ToolBinding::with_steps(&["upper tine", "lower tine"]));
    add("fibonacci", ToolBinding::with_steps(&["end point", "height"]));
    add("parallel-channel", ToolBinding::with_steps(&["end point", "channel height"]));

    add("toggle-annotations", ToolBinding::action(BindingAction::ToggleAnnotations));
    for kind in [SeriesKind::Line, SeriesKind::Ohlc, SeriesKind::Candlestick] {
        add(
            &format!("series-type-{}", kind.name()),
            ToolBinding::action(BindingAction::SeriesType(kind)),
        );
    }
    tools
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum BindingState {
    /// No tool selected.
    #[default]
    Idle,
    /// Tool selected, waiting for the first click.
    Armed { tool: String },
    /// First click done; `step` is the index of the next step to satisfy.
    Collecting { tool: String, step: usize, points: Vec<ControlPoint> },
}

/// What a click did.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// No tool armed.
    Ignored,
    /// Multi-step gesture started.
    Started,
    /// A step was recorded; holds the index of the next step.
    Stepped(usize),
    /// Gesture finished; the caller appends the annotation.
    Committed(Annotation),
}

#[derive(Clone, Debug)]
pub struct NavigationBindings {
    bindings: BTreeMap<String, ToolBinding>,
    state: BindingState,
    preview: Option<ControlPoint>,
}

impl Default for NavigationBindings {
    fn default() -> Self {
        Self::new(stock_tools())
    }
}

impl NavigationBindings {
    pub fn new(bindings: BTreeMap<String, ToolBinding>) -> Self {
        Self { bindings, state: BindingState::Idle, preview: None }
    }

    pub fn bindings(&self) -> &BTreeMap<String, ToolBinding> {
        &self.bindings
    }

    pub fn binding(&self, name: &str) -> Option<&ToolBinding> {
        self.bindings.get(name)
    }

    /// Add or replace a binding.
    pub fn insert(&mut self, name: impl Into<String>, binding: ToolBinding) {
        self.bindings.insert(name.into(), binding);
    }

    pub fn state(&self) -> &BindingState {
        &self.state
    }

    /// Last pointer position seen while a tool was active.
    pub fn preview(&self) -> Option<&ControlPoint> {
        self.preview.as_ref()
    }

    /// Currently selected drawing tool, if any.
    pub fn active_tool(&self) -> Option<&str> {
        match &self.state {
            BindingState::Idle => None,
            BindingState::Armed { tool } | BindingState::Collecting { tool, .. } => {
                Some(tool.as_str())
            }
        }
    }

    /// Select a binding by name. Drawing tools arm the state machine; action bindings
    /// reset it and return the action for the caller to run.
    pub fn select(&mut self, name: &str) -> Result<Option<BindingAction>> {
        let binding = self
            .bindings
            .get(name)
            .ok_or_else(|| ChartError::UnknownTool(name.to_string()))?;
        let action = binding.action;
        self.discard_partial();
        self.preview = None;
        match action {
            Some(action) => {
                self.state = BindingState::Idle;
                log::debug!("binding {name}: action {action:?}");
                Ok(Some(action))
            }
            None => {
                self.state = BindingState::Armed { tool: name.to_string() };
                log::debug!("binding {name}: armed");
                Ok(None)
            }
        }
    }

    /// Drop the active tool and any partial shape.
    pub fn deselect(&mut self) {
        self.discard_partial();
        self.state = BindingState::Idle;
        self.preview = None;
    }

    fn discard_partial(&mut self) {
        if let BindingState::Collecting { tool, points, .. } = &self.state {
            log::debug!(
                "binding {tool}: discarding partial shape with {} point(s)",
                points.len()
            );
        }
    }

    /// Feed a click at `point`.
    pub fn on_click(&mut self, point: ControlPoint) -> ClickOutcome {
        match std::mem::take(&mut self.state) {
            BindingState::Idle => ClickOutcome::Ignored,
            BindingState::Armed { tool } => {
                let Some(binding) = self.bindings.get(&tool) else {
                    return ClickOutcome::Ignored;
                };
                if binding.is_one_shot() {
                    self.commit(tool, vec![point])
                } else {
                    self.state = BindingState::Collecting { tool, step: 0, points: vec![point] };
                    ClickOutcome::Started
                }
            }
            BindingState::Collecting { tool, step, mut points } => {
                let step_count = self.bindings.get(&tool).map_or(0, ToolBinding::step_count);
                points.push(point);
                if step + 1 < step_count {
                    self.state = BindingState::Collecting { tool, step: step + 1, points };
                    ClickOutcome::Stepped(step + 1)
                } else {
                    self.commit(tool, points)
                }
            }
        }
    }

    /// Feed a pointer move; only the preview position changes.
    pub fn on_mousemove(&mut self, point: ControlPoint) {
        if !matches!(self.state, BindingState::Idle) {
            self.preview = Some(point);
        }
    }

    fn commit(&mut self, tool: String, points: Vec<ControlPoint>) -> ClickOutcome {
        let keep = self.bindings.get(&tool).is_some_and(|b| b.keep_selected);
        let annotation = Annotation::from_binding(&tool, points);
        log::debug!("binding {tool}: committed annotation {:?}", annotation.id);
        self.preview = None;
        self.state = if keep { BindingState::Armed { tool } } else { BindingState::Idle };
        ClickOutcome::Committed(annotation)
    }
}
