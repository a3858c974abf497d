use tracing::{debug, trace};

use super::mapping::{highlight, Highlight, MappedEntries};
use super::summary::{compute_summary, SelectionSummary};
use super::{BrushDimension, BrushOptions, Selection};
use crate::error::StackError;
use crate::model::{Dataset, Entry};
use crate::scale::{ScaleAdapter, ScaleKey, ScaleKind};
use crate::validation::validate;

/// A raw pointer position forwarded by the rendering layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Lifecycle state of the brush.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BrushState {
    #[default]
    Idle,
    Dragging,
    Committed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrushEventKind {
    Start,
    Change,
    End,
}

/// What a listener receives on every brush event.
#[derive(Debug)]
pub struct BrushEvent<'a> {
    pub kind: BrushEventKind,
    /// The pointer event that caused this, or `None` for programmatic changes.
    pub pointer: Option<PointerEvent>,
    pub selection: Option<Selection>,
    /// Selected entry indices, in dataset order.
    pub indices: &'a [usize],
    pub summary: &'a SelectionSummary,
    entries: &'a [Entry],
}

impl<'a> BrushEvent<'a> {
    /// The selected entries, in dataset order.
    pub fn selected_entries(&self) -> impl Iterator<Item = &'a Entry> + '_ {
        let entries = self.entries;
        self.indices.iter().filter_map(move |&i| entries.get(i))
    }

    /// The selected entries as a new dataset.
    pub fn filtered(&self) -> Dataset {
        self.selected_entries().cloned().collect()
    }
}

/// Which entry attribute an axis positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AxisField {
    /// The entry label, as a category key.
    #[default]
    Label,
    /// The entry's value from the load accessor.
    Value,
}

/// The rendering-side container the engine draws into.
///
/// The engine only appends its overlay and restyles entries by index.
pub trait BrushHost {
    fn append_overlay(&mut self, options: &BrushOptions);
    fn style_entry(&mut self, index: usize, highlight: Highlight);
}

type Listener = Box<dyn FnMut(&BrushEvent<'_>)>;

#[derive(Default)]
struct Listeners {
    start: Vec<Listener>,
    change: Vec<Listener>,
    end: Vec<Listener>,
}

struct Axis {
    scale: Box<dyn ScaleAdapter>,
    kind: ScaleKind,
    field: AxisField,
}

impl Axis {
    fn positions(&self, dataset: &Dataset, values: &[f64]) -> Vec<Option<f64>> {
        dataset
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let key = match self.field {
                    AxisField::Label => ScaleKey::Category(&entry.label),
                    AxisField::Value => ScaleKey::Value(*values.get(i)?),
                };
                self.kind.selection_position(self.scale.as_ref(), &key)
            })
            .collect()
    }
}

/// Owns the current brush selection and the subset it maps to.
///
/// The dataset is validated once in [`load`](Self::load). Pointer handlers
/// only scan the cached axis positions, so each call is linear in the number
/// of entries.
pub struct SelectionEngine {
    options: BrushOptions,
    x_axis: Option<Axis>,
    y_axis: Option<Axis>,
    dataset: Dataset,
    values: Vec<f64>,
    mapped: MappedEntries,
    state: BrushState,
    anchor: Option<(f64, f64)>,
    selection: Option<Selection>,
    indices: Vec<usize>,
    summary: SelectionSummary,
    listeners: Listeners,
}

/// Creates an idle engine with no data and no scales.
pub fn create_selection_engine(options: BrushOptions) -> SelectionEngine {
    SelectionEngine::new(options)
}

impl SelectionEngine {
    pub fn new(options: BrushOptions) -> Self {
        Self {
            options,
            x_axis: None,
            y_axis: None,
            dataset: Dataset::default(),
            values: Vec::new(),
            mapped: MappedEntries::default(),
            state: BrushState::Idle,
            anchor: None,
            selection: None,
            indices: Vec::new(),
            summary: SelectionSummary::default(),
            listeners: Listeners::default(),
        }
    }

    /// Attaches the horizontal scale.
    ///
    /// # Errors
    /// Returns [`StackError::Configuration`] if the scale is neither discrete
    /// nor continuous.
    pub fn with_x_axis(
        mut self,
        scale: Box<dyn ScaleAdapter>,
        field: AxisField,
    ) -> Result<Self, StackError> {
        let kind = ScaleKind::detect(scale.as_ref())?;
        self.x_axis = Some(Axis { scale, kind, field });
        self.remap();
        Ok(self)
    }

    /// Attaches the vertical scale. Same rules as [`with_x_axis`](Self::with_x_axis).
    pub fn with_y_axis(
        mut self,
        scale: Box<dyn ScaleAdapter>,
        field: AxisField,
    ) -> Result<Self, StackError> {
        let kind = ScaleKind::detect(scale.as_ref())?;
        self.y_axis = Some(Axis { scale, kind, field });
        self.remap();
        Ok(self)
    }

    pub fn on_start(&mut self, listener: impl FnMut(&BrushEvent<'_>) + 'static) -> &mut Self {
        self.listeners.start.push(Box::new(listener));
        self
    }

    pub fn on_change(&mut self, listener: impl FnMut(&BrushEvent<'_>) + 'static) -> &mut Self {
        self.listeners.change.push(Box::new(listener));
        self
    }

    pub fn on_end(&mut self, listener: impl FnMut(&BrushEvent<'_>) + 'static) -> &mut Self {
        self.listeners.end.push(Box::new(listener));
        self
    }

    /// Loads a dataset, using `accessor` for each entry's summary value.
    pub fn load<F>(&mut self, dataset: Dataset, accessor: F) -> Result<(), StackError>
    where
        F: Fn(&Entry) -> f64,
    {
        let values = dataset.iter().map(accessor).collect();
        self.load_with_values(dataset, values)
    }

    /// Loads a dataset with precomputed per-entry values.
    ///
    /// # Errors
    /// Fails if the dataset is invalid or `values` does not have one value
    /// per entry. The engine keeps its previous data on failure.
    pub fn load_with_values(&mut self, dataset: Dataset, values: Vec<f64>) -> Result<(), StackError> {
        validate(&dataset)?;
        if values.len() != dataset.len() {
            return Err(StackError::ShapeMismatch {
                message: format!(
                    "{} value(s) supplied for {} entries",
                    values.len(),
                    dataset.len()
                ),
            });
        }

        debug!(entries = dataset.len(), "loaded dataset into selection engine");
        self.dataset = dataset;
        self.values = values;
        self.remap();
        Ok(())
    }

    fn remap(&mut self) {
        self.mapped = MappedEntries {
            len: self.dataset.len(),
            x: self
                .x_axis
                .as_ref()
                .map(|axis| axis.positions(&self.dataset, &self.values)),
            y: self
                .y_axis
                .as_ref()
                .map(|axis| axis.positions(&self.dataset, &self.values)),
        };
        self.recompute();
    }

    fn recompute(&mut self) {
        self.indices = self
            .mapped
            .select(self.options.dimension, self.selection.as_ref());
        self.summary = SelectionSummary::from_values(
            self.indices.iter().filter_map(|&i| self.values.get(i).copied()),
        );
    }

    fn emit(&mut self, kind: BrushEventKind, pointer: Option<PointerEvent>) {
        let event = BrushEvent {
            kind,
            pointer,
            selection: self.selection,
            indices: &self.indices,
            summary: &self.summary,
            entries: &self.dataset.entries,
        };
        let listeners = match kind {
            BrushEventKind::Start => &mut self.listeners.start,
            BrushEventKind::Change => &mut self.listeners.change,
            BrushEventKind::End => &mut self.listeners.end,
        };
        for listener in listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Selection spanned by the drag anchor and `pointer`, or `None` if empty.
    fn drag_selection(&self, pointer: PointerEvent) -> Option<Selection> {
        let (ax, ay) = self.anchor?;
        let (x, y) = self.options.clamp(pointer.x, pointer.y);

        let selection = match self.options.dimension {
            BrushDimension::X => Selection::span(ax, x),
            BrushDimension::Y => Selection::span(ay, y),
            BrushDimension::XY => Selection::region((ax, x), (ay, y)),
        };
        (!selection.is_empty()).then_some(selection)
    }

    /// Handles pointer-down. Returns false if the point is outside the brush.
    ///
    /// A pointer-down during a drag abandons that drag and starts a new one.
    pub fn pointer_down(&mut self, pointer: PointerEvent) -> bool {
        if !self.options.contains(pointer.x, pointer.y) {
            trace!(x = pointer.x, y = pointer.y, "pointer down outside brush");
            return false;
        }
        if self.state == BrushState::Dragging {
            debug!("new drag replaces the active one");
        }

        self.anchor = Some((pointer.x, pointer.y));
        self.state = BrushState::Dragging;
        self.selection = None;
        self.recompute();
        self.emit(BrushEventKind::Start, Some(pointer));
        true
    }

    /// Handles pointer-move. Ignored unless a drag is active.
    pub fn pointer_move(&mut self, pointer: PointerEvent) -> bool {
        if self.state != BrushState::Dragging {
            return false;
        }

        self.selection = self.drag_selection(pointer);
        self.recompute();
        trace!(selected = self.indices.len(), "brush moved");
        self.emit(BrushEventKind::Change, Some(pointer));
        true
    }

    /// Handles pointer-up. An empty drag clears the selection.
    pub fn pointer_up(&mut self, pointer: PointerEvent) -> bool {
        if self.state != BrushState::Dragging {
            return false;
        }

        self.selection = self.drag_selection(pointer);
        self.anchor = None;
        self.state = if self.selection.is_some() {
            BrushState::Committed
        } else {
            BrushState::Idle
        };
        self.recompute();
        debug!(
            selected = self.indices.len(),
            state = ?self.state,
            "brush released"
        );
        self.emit(BrushEventKind::End, Some(pointer));
        true
    }

    pub fn get_selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Replaces the selection programmatically and emits change then end.
    ///
    /// An empty selection is treated as `None`.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection.filter(|s| !s.is_empty());
        self.anchor = None;
        self.state = if self.selection.is_some() {
            BrushState::Committed
        } else {
            BrushState::Idle
        };
        self.recompute();
        self.emit(BrushEventKind::Change, None);
        self.emit(BrushEventKind::End, None);
    }

    /// Drops the selection and returns to idle, emitting end.
    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.anchor = None;
        self.state = BrushState::Idle;
        self.recompute();
        self.emit(BrushEventKind::End, None);
    }

    pub fn state(&self) -> BrushState {
        self.state
    }

    pub fn options(&self) -> &BrushOptions {
        &self.options
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selected_indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn summary(&self) -> &SelectionSummary {
        &self.summary
    }

    pub fn selected_entries(&self) -> impl Iterator<Item = &Entry> + '_ {
        let entries = &self.dataset.entries;
        self.indices.iter().filter_map(move |&i| entries.get(i))
    }

    pub fn filtered_dataset(&self) -> Dataset {
        self.selected_entries().cloned().collect()
    }

    /// Per-entry styling for the current selection.
    pub fn highlights(&self) -> Vec<Highlight> {
        highlight(self.dataset.len(), &self.indices)
    }

    /// Data-space bounds of the selection on the brushed axis.
    ///
    /// Only available when that axis has a continuous scale; for a 2-D brush
    /// the x axis is used.
    pub fn domain_range(&self) -> Option<(f64, f64)> {
        let selection = self.selection?;
        let (x_bounds, y_bounds) = selection.bounds_for(self.options.dimension);
        let (axis, (low, high)) = match self.options.dimension {
            BrushDimension::Y => (self.y_axis.as_ref()?, y_bounds?),
            _ => (self.x_axis.as_ref()?, x_bounds?),
        };
        if axis.kind.is_discrete() {
            return None;
        }

        let a = axis.scale.invert(low)?;
        let b = axis.scale.invert(high)?;
        Some(if b < a { (b, a) } else { (a, b) })
    }

    /// Summarizes arbitrary entries with `accessor`.
    pub fn compute_summary<'a, I, F>(entries: I, accessor: F) -> SelectionSummary
    where
        I: IntoIterator<Item = &'a Entry>,
        F: Fn(&Entry) -> f64,
    {
        compute_summary(entries, accessor)
    }

    /// Adds the brush overlay to the host.
    pub fn attach(&self, host: &mut dyn BrushHost) {
        host.append_overlay(&self.options);
    }

    /// Pushes the current highlight state to the host.
    pub fn apply_highlights(&self, host: &mut dyn BrushHost) {
        for (index, style) in self.highlights().into_iter().enumerate() {
            host.style_entry(index, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Segment;
    use crate::scale::{BandScale, LinearScale};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn dataset() -> Dataset {
        Dataset::new(vec![
            Entry::new("A", vec![Segment::new(10.0, "red")]),
            Entry::new("B", vec![Segment::new(-4.0, "red"), Segment::new(1.0, "blue")]),
            Entry::new("C", vec![Segment::new(7.0, "red")]),
        ])
    }

    fn band_scale() -> Box<dyn ScaleAdapter> {
        // Centers at 50, 150, 250.
        Box::new(
            BandScale::try_new(vec!["A".into(), "B".into(), "C".into()])
                .expect("scale")
                .range((0.0, 300.0))
                .padding_inner(0.2)
                .padding_outer(0.1),
        )
    }

    fn engine() -> SelectionEngine {
        let mut engine = create_selection_engine(BrushOptions::new(
            BrushDimension::X,
            [[0.0, 0.0], [300.0, 100.0]],
        ))
        .with_x_axis(band_scale(), AxisField::Label)
        .expect("axis");
        engine.load(dataset(), Entry::total).expect("load");
        engine
    }

    fn record(engine: &mut SelectionEngine) -> Rc<RefCell<Vec<(BrushEventKind, Vec<usize>)>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            BrushEventKind::Start,
            BrushEventKind::Change,
            BrushEventKind::End,
        ] {
            let log = Rc::clone(&log);
            let listener = move |e: &BrushEvent<'_>| log.borrow_mut().push((e.kind, e.indices.to_vec()));
            match kind {
                BrushEventKind::Start => engine.on_start(listener),
                BrushEventKind::Change => engine.on_change(listener),
                BrushEventKind::End => engine.on_end(listener),
            };
        }
        log
    }

    #[test]
    fn test_loaded_engine_selects_everything() {
        let engine = engine();
        assert_eq!(engine.state(), BrushState::Idle);
        assert_eq!(engine.get_selection(), None);
        assert_eq!(engine.selected_indices(), &[0, 1, 2]);
        assert_eq!(engine.summary().sum, 14.0);
        assert!(engine.highlights().iter().all(|h| h.opacity == 1.0));
    }

    #[test]
    fn test_drag_lifecycle() {
        let mut engine = engine();
        let log = record(&mut engine);

        assert!(engine.pointer_down(PointerEvent::new(100.0, 10.0)));
        assert_eq!(engine.state(), BrushState::Dragging);
        assert!(engine.pointer_move(PointerEvent::new(160.0, 20.0)));
        assert!(engine.pointer_move(PointerEvent::new(200.0, 20.0)));
        assert!(engine.pointer_up(PointerEvent::new(200.0, 20.0)));

        assert_eq!(engine.state(), BrushState::Committed);
        assert_eq!(engine.get_selection(), Some(Selection::span(100.0, 200.0)));
        assert_eq!(engine.selected_indices(), &[1]);
        assert_eq!(engine.summary().sum, -3.0);
        assert_eq!(engine.filtered_dataset().labels(), vec!["B"]);

        let log = log.borrow();
        let kinds: Vec<BrushEventKind> = log.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                BrushEventKind::Start,
                BrushEventKind::Change,
                BrushEventKind::Change,
                BrushEventKind::End
            ]
        );
        assert_eq!(log[3].1, vec![1]);
    }

    #[test]
    fn test_empty_drag_clears() {
        let mut engine = engine();
        engine.set_selection(Some(Selection::span(0.0, 100.0)));
        assert_eq!(engine.selected_indices(), &[0]);

        engine.pointer_down(PointerEvent::new(120.0, 5.0));
        engine.pointer_up(PointerEvent::new(120.0, 5.0));
        assert_eq!(engine.state(), BrushState::Idle);
        assert_eq!(engine.get_selection(), None);
        assert_eq!(engine.selected_indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_pointer_outside_extent_is_ignored() {
        let mut engine = engine();
        assert!(!engine.pointer_down(PointerEvent::new(400.0, 10.0)));
        assert!(!engine.pointer_move(PointerEvent::new(50.0, 10.0)));
        assert!(!engine.pointer_up(PointerEvent::new(50.0, 10.0)));
        assert_eq!(engine.state(), BrushState::Idle);
    }

    #[test]
    fn test_moves_are_clamped_to_extent() {
        let mut engine = engine();
        engine.pointer_down(PointerEvent::new(200.0, 10.0));
        engine.pointer_move(PointerEvent::new(900.0, 10.0));
        assert_eq!(engine.get_selection(), Some(Selection::span(200.0, 300.0)));
        assert_eq!(engine.selected_indices(), &[2]);
    }

    #[test]
    fn test_new_drag_overwrites_active_drag() {
        let mut engine = engine();
        engine.pointer_down(PointerEvent::new(0.0, 10.0));
        engine.pointer_move(PointerEvent::new(300.0, 10.0));
        assert_eq!(engine.selected_indices(), &[0, 1, 2]);

        engine.pointer_down(PointerEvent::new(230.0, 10.0));
        assert_eq!(engine.get_selection(), None);
        engine.pointer_up(PointerEvent::new(270.0, 10.0));
        assert_eq!(engine.get_selection(), Some(Selection::span(230.0, 270.0)));
        assert_eq!(engine.selected_indices(), &[2]);
    }

    #[test]
    fn test_set_and_clear_emit_events() {
        let mut engine = engine();
        let log = record(&mut engine);

        engine.set_selection(Some(Selection::span(40.0, 160.0)));
        assert_eq!(engine.state(), BrushState::Committed);
        assert_eq!(engine.selected_indices(), &[0, 1]);
        engine.clear_selection();
        assert_eq!(engine.state(), BrushState::Idle);

        let log = log.borrow();
        assert_eq!(
            log.iter().map(|(k, _)| *k).collect::<Vec<_>>(),
            vec![
                BrushEventKind::Change,
                BrushEventKind::End,
                BrushEventKind::End
            ]
        );
        assert_eq!(log[2].1, vec![0, 1, 2]);
    }

    #[test]
    fn test_selection_with_no_matches_is_fully_visible() {
        let mut engine = engine();
        engine.set_selection(Some(Selection::span(60.0, 100.0)));
        assert!(engine.selected_indices().is_empty());
        assert!(engine.summary().is_empty());
        assert!(engine.highlights().iter().all(|h| h.opacity == 1.0));
    }

    #[test]
    fn test_y_brush_uses_value_positions() {
        let mut engine = create_selection_engine(BrushOptions::new(
            BrushDimension::Y,
            [[0.0, 0.0], [300.0, 200.0]],
        ))
        .with_x_axis(band_scale(), AxisField::Label)
        .expect("x axis")
        .with_y_axis(
            Box::new(LinearScale::new((-10.0, 10.0), (200.0, 0.0))),
            AxisField::Value,
        )
        .expect("y axis");
        engine.load(dataset(), Entry::total).expect("load");

        // Totals 10, -3, 7 map to y = 0, 130, 30.
        engine.set_selection(Some(Selection::span(0.0, 50.0)));
        assert_eq!(engine.selected_indices(), &[0, 2]);

        let (lo, hi) = engine.domain_range().expect("continuous axis");
        assert!((lo - 5.0).abs() < 1e-9 && (hi - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_xy_drag_intersects_both_axes() {
        let mut engine = create_selection_engine(BrushOptions::new(
            BrushDimension::XY,
            [[0.0, 0.0], [300.0, 200.0]],
        ))
        .with_x_axis(band_scale(), AxisField::Label)
        .expect("x axis")
        .with_y_axis(
            Box::new(LinearScale::new((-10.0, 10.0), (200.0, 0.0))),
            AxisField::Value,
        )
        .expect("y axis");
        engine.load(dataset(), Entry::total).expect("load");
        let log = record(&mut engine);

        // A at (50, 0), B at (150, 130), C at (250, 30).
        assert!(engine.pointer_down(PointerEvent::new(0.0, 0.0)));
        assert!(engine.pointer_move(PointerEvent::new(300.0, 50.0)));
        assert!(engine.pointer_up(PointerEvent::new(300.0, 50.0)));
        assert_eq!(engine.state(), BrushState::Committed);
        assert_eq!(
            engine.get_selection(),
            Some(Selection::region((0.0, 300.0), (0.0, 50.0)))
        );
        assert_eq!(engine.selected_indices(), &[0, 2]);
        assert_eq!(log.borrow().last().map(|(_, i)| i.clone()), Some(vec![0, 2]));

        // Narrow x band around B, full height.
        engine.pointer_down(PointerEvent::new(100.0, 0.0));
        engine.pointer_up(PointerEvent::new(200.0, 200.0));
        assert_eq!(engine.selected_indices(), &[1]);

        // Right x range but flat in y clears the brush.
        engine.pointer_down(PointerEvent::new(40.0, 10.0));
        engine.pointer_up(PointerEvent::new(260.0, 10.0));
        assert_eq!(engine.state(), BrushState::Idle);
        assert_eq!(engine.get_selection(), None);
        assert_eq!(engine.selected_indices(), &[0, 1, 2]);
    }

    #[test]
    fn test_domain_range_requires_continuous_scale() {
        let mut engine = engine();
        engine.set_selection(Some(Selection::span(0.0, 100.0)));
        assert_eq!(engine.domain_range(), None);
    }

    #[test]
    fn test_invalid_scale_and_data() {
        struct Opaque;
        impl ScaleAdapter for Opaque {
            fn position_of(&self, _key: &ScaleKey<'_>) -> Option<f64> {
                Some(0.0)
            }
        }

        let result = SelectionEngine::new(BrushOptions::default())
            .with_x_axis(Box::new(Opaque), AxisField::Label);
        assert!(matches!(result, Err(StackError::Configuration { .. })));

        let mut engine = engine();
        assert!(engine.load(Dataset::default(), Entry::total).is_err());
        assert!(engine
            .load_with_values(dataset(), vec![1.0])
            .is_err());
        assert_eq!(engine.dataset().len(), 3);
    }

    #[derive(Default)]
    struct RecordingHost {
        overlays: usize,
        styles: Vec<(usize, Highlight)>,
    }

    impl BrushHost for RecordingHost {
        fn append_overlay(&mut self, _options: &BrushOptions) {
            self.overlays += 1;
        }

        fn style_entry(&mut self, index: usize, highlight: Highlight) {
            self.styles.push((index, highlight));
        }
    }

    #[test]
    fn test_host_integration() {
        let mut engine = engine();
        let mut host = RecordingHost::default();
        engine.attach(&mut host);
        engine.set_selection(Some(Selection::span(100.0, 300.0)));
        engine.apply_highlights(&mut host);

        assert_eq!(host.overlays, 1);
        let selected: Vec<bool> = host.styles.iter().map(|(_, h)| h.selected).collect();
        assert_eq!(selected, vec![false, true, true]);
        assert_eq!(host.styles[0].1.opacity, crate::selection::DIMMED_OPACITY);
    }

    #[test]
    fn test_listener_sees_subset() {
        let mut engine = engine();
        let labels = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&labels);
        engine.on_end(move |event| {
            *sink.borrow_mut() = event
                .selected_entries()
                .map(|e| e.label.clone())
                .collect::<Vec<_>>();
            assert_eq!(event.filtered().len(), event.summary.count);
        });

        engine.set_selection(Some(Selection::span(140.0, 260.0)));
        assert_eq!(*labels.borrow(), vec!["B".to_string(), "C".to_string()]);
    }
}
