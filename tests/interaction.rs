use graph_schema_designer::{
	DEFAULT_EDGE_LABEL, EditorConfig, EditorState, Interaction, Point, PointerTarget,
};

fn editor_with_a_and_b() -> (EditorState, String, String) {
	let mut state = EditorState::new(EditorConfig::default(), 800.0, 600.0);
	let a = state.model.create_node(Point::new(0.0, 0.0));
	let b = state.model.create_node(Point::new(100.0, 100.0));
	(state, a, b)
}

#[test]
fn shift_clicking_two_nodes_creates_one_edge() {
	let (mut state, a, b) = editor_with_a_and_b();

	// Inside A only, then inside B only.
	state.pointer_down(Point::new(10.0, 10.0), true);
	assert_eq!(state.interaction, Interaction::Connecting { source: a.clone() });
	state.pointer_down(Point::new(120.0, 130.0), true);

	assert_eq!(state.interaction, Interaction::Idle);
	let edges = state.model.edges();
	assert_eq!(edges.len(), 1);
	assert_eq!(edges[0].source, a);
	assert_eq!(edges[0].target, b);
	assert_eq!(edges[0].label, DEFAULT_EDGE_LABEL);
	assert!(edges[0].properties.is_empty());
	assert!(state.model.selection().is_none());
}

#[test]
fn shift_clicking_the_source_again_cancels() {
	let (mut state, a, _) = editor_with_a_and_b();
	state.press(PointerTarget::Node(a.clone()), Point::default(), true);
	state.press(PointerTarget::Node(a), Point::default(), true);

	assert_eq!(state.interaction, Interaction::Idle);
	assert!(state.model.edges().is_empty());
}

#[test]
fn pressing_canvas_cancels_connect_without_panning() {
	let (mut state, a, _) = editor_with_a_and_b();
	state.press(PointerTarget::Node(a), Point::default(), true);
	state.pointer_down(Point::new(700.0, 500.0), false);

	assert_eq!(state.interaction, Interaction::Idle);
	assert!(!state.pointer_move(Point::new(710.0, 510.0)));
	assert_eq!(state.view.pan, Point::default());
}

#[test]
fn leaving_the_canvas_ends_a_drag() {
	let (mut state, _, b) = editor_with_a_and_b();
	state.pointer_down(Point::new(150.0, 120.0), false);
	assert!(matches!(state.interaction, Interaction::Dragging { .. }));
	assert_eq!(state.model.selection().node(), Some(b.as_str()));

	state.pointer_move(Point::new(160.0, 125.0));
	state.pointer_up();
	assert_eq!(state.interaction, Interaction::Idle);
	let node = state.model.node(&b).expect("b still present");
	assert_eq!(node.position(), Point::new(110.0, 105.0));
}

#[test]
fn panning_clears_selection_and_moves_view() {
	let (mut state, a, _) = editor_with_a_and_b();
	state.model.select_node(&a);

	state.pointer_down(Point::new(600.0, 400.0), false);
	assert!(state.model.selection().is_none());
	state.pointer_move(Point::new(650.0, 380.0));
	state.pointer_up();

	assert_eq!(state.view.pan, Point::new(50.0, -20.0));
	// Nodes themselves do not move when panning.
	assert_eq!(
		state.model.node(&a).map(|n| n.position()),
		Some(Point::new(0.0, 0.0))
	);
}
