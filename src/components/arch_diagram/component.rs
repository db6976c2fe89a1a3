use std::cell::RefCell;
use std::rc::Rc;

use leptos::either::{Either, EitherOf3};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, IntersectionObserver, IntersectionObserverEntry,
	IntersectionObserverInit, MouseEvent, Window,
};

use super::config::ARCHITECTURE;
use super::render;
use super::state::{AnimationGate, DiagramState, RESIZE_DEBOUNCE_MS, VISIBILITY_THRESHOLD};
use super::types::{Diagram, Node, NodeExtra};

const FALLBACK_COLOR: &str = "#64748b";

/// Interactive architecture diagram: DOM nodes positioned over a canvas of
/// curved edges, with click-to-select and a traveling dot on live edges
/// while the section is in view.
#[component]
pub fn ArchDiagram(#[prop(default = &ARCHITECTURE)] diagram: &'static Diagram) -> impl IntoView {
	let section_ref = NodeRef::<leptos::html::Section>::new();
	let diagram_ref = NodeRef::<leptos::html::Div>::new();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();

	let state: Rc<RefCell<DiagramState>> = Rc::new(RefCell::new(DiagramState::new(diagram)));
	let ctx: Rc<RefCell<Option<CanvasRenderingContext2d>>> = Rc::new(RefCell::new(None));
	let gate: Rc<RefCell<AnimationGate>> = Rc::new(RefCell::new(AnimationGate::default()));
	// Bumped after every state mutation; node styles and the detail panel
	// re-read the state through it.
	let rev = RwSignal::new(0u64);

	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_now: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let observer: Rc<RefCell<Option<IntersectionObserver>>> = Rc::new(RefCell::new(None));
	let observer_cb: Rc<RefCell<Option<Closure<dyn FnMut(js_sys::Array)>>>> =
		Rc::new(RefCell::new(None));
	let debounce: Rc<RefCell<Option<i32>>> = Rc::new(RefCell::new(None));

	// Selection changed: let the views re-read state and redraw the canvas
	// even when the animation loop is paused off-screen.
	let repaint: Rc<dyn Fn()> = {
		let (state, ctx) = (state.clone(), ctx.clone());
		Rc::new(move || {
			rev.update(|r| *r += 1);
			if let Some(ctx) = ctx.borrow().as_ref() {
				render::draw_edges(&state.borrow(), ctx);
			}
		})
	};

	let (state_init, ctx_init, gate_init) = (state.clone(), ctx.clone(), gate.clone());
	let (animate_init, resize_cb_init, resize_now_init) =
		(animate.clone(), resize_cb.clone(), resize_now.clone());
	let (observer_init, observer_cb_init, debounce_init) =
		(observer.clone(), observer_cb.clone(), debounce.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(diagram_el) = diagram_ref.get() else {
			return;
		};
		let Some(section_el) = section_ref.get() else {
			return;
		};
		if let Err(err) = diagram.validate() {
			log::error!("architecture diagram disabled: {err}");
			return;
		}

		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();
		let context: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*ctx_init.borrow_mut() = Some(context);

		// Layout pass: size the canvas for the display's pixel density,
		// refresh the pixel cache, reposition nodes, redraw edges.
		let do_resize: Rc<dyn Fn()> = {
			let (state_rs, ctx_rs, canvas_rs) = (state_init.clone(), ctx_init.clone(), canvas);
			Rc::new(move || {
				let win = web_sys::window().unwrap();
				let rect = diagram_el.get_bounding_client_rect();
				let (w, h) = (rect.width(), rect.height());
				let dpr = win.device_pixel_ratio();
				canvas_rs.set_width((w * dpr) as u32);
				canvas_rs.set_height((h * dpr) as u32);
				let style = canvas_rs.style();
				let _ = style.set_property("width", &format!("{w}px"));
				let _ = style.set_property("height", &format!("{h}px"));
				state_rs.borrow_mut().resize(w, h);
				rev.update(|r| *r += 1);
				if let Some(ctx) = ctx_rs.borrow().as_ref() {
					let _ = ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
					render::draw_edges(&state_rs.borrow(), ctx);
				}
			})
		};
		do_resize();

		*resize_now_init.borrow_mut() = Some(Closure::new({
			let do_resize = do_resize.clone();
			move || do_resize()
		}));

		// Window resizes are debounced: nothing recomputes until the
		// viewport has been quiet for the full window.
		let (resize_inner, debounce_rs) = (resize_now_init.clone(), debounce_init.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win = web_sys::window().unwrap();
			if let Some(handle) = debounce_rs.borrow_mut().take() {
				win.clear_timeout_with_handle(handle);
			}
			if let Some(ref cb) = *resize_inner.borrow() {
				if let Ok(handle) = win.set_timeout_with_callback_and_timeout_and_arguments_0(
					cb.as_ref().unchecked_ref(),
					RESIZE_DEBOUNCE_MS,
				) {
					*debounce_rs.borrow_mut() = Some(handle);
				}
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, ctx_anim, gate_anim, animate_inner) = (
			state_init.clone(),
			ctx_init.clone(),
			gate_init.clone(),
			animate_init.clone(),
		);
		*animate_init.borrow_mut() = Some(Closure::new(move |timestamp: f64| {
			if !gate_anim.borrow().is_running() {
				return;
			}
			if let Some(ctx) = ctx_anim.borrow().as_ref() {
				let s = state_anim.borrow();
				render::draw_edges(&s, ctx);
				render::draw_flow_dots(&s, ctx, timestamp);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Ok(handle) = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref())
				{
					gate_anim.borrow_mut().scheduled(handle);
				}
			}
		}));

		// The loop runs only while the section is on screen. Start is
		// guarded by the gate so a second chain can never spawn; stop
		// cancels the pending frame so no stale callback fires.
		let (gate_io, animate_io) = (gate_init.clone(), animate_init.clone());
		let on_visibility = Closure::<dyn FnMut(js_sys::Array)>::new(move |entries: js_sys::Array| {
			let win = web_sys::window().unwrap();
			for entry in entries.iter() {
				let entry: IntersectionObserverEntry = entry.unchecked_into();
				if entry.is_intersecting() {
					if gate_io.borrow().is_running() {
						continue;
					}
					if let Some(ref cb) = *animate_io.borrow() {
						if let Ok(handle) =
							win.request_animation_frame(cb.as_ref().unchecked_ref())
						{
							gate_io.borrow_mut().scheduled(handle);
						}
					}
				} else if let Some(handle) = gate_io.borrow_mut().cancel() {
					let _ = win.cancel_animation_frame(handle);
				}
			}
		});
		let opts = IntersectionObserverInit::new();
		opts.set_threshold(&JsValue::from_f64(VISIBILITY_THRESHOLD));
		if let Ok(obs) =
			IntersectionObserver::new_with_options(on_visibility.as_ref().unchecked_ref(), &opts)
		{
			obs.observe(&section_el);
			*observer_init.borrow_mut() = Some(obs);
		}
		*observer_cb_init.borrow_mut() = Some(on_visibility);
	});

	on_cleanup({
		let (gate, observer, resize_cb, debounce) = (
			gate.clone(),
			observer.clone(),
			resize_cb.clone(),
			debounce.clone(),
		);
		move || {
			let Some(window) = web_sys::window() else {
				return;
			};
			if let Some(handle) = gate.borrow_mut().cancel() {
				let _ = window.cancel_animation_frame(handle);
			}
			if let Some(handle) = debounce.borrow_mut().take() {
				window.clear_timeout_with_handle(handle);
			}
			if let Some(obs) = observer.borrow_mut().take() {
				obs.disconnect();
			}
			if let Some(cb) = resize_cb.borrow_mut().take() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let repaint_bg = repaint.clone();
	let state_bg = state.clone();
	let on_background_click = move |_: MouseEvent| {
		state_bg.borrow_mut().clear_selection();
		repaint_bg();
	};

	let detail = {
		let state = state.clone();
		move || {
			rev.track();
			let selected = state.borrow().selected();
			match selected.and_then(|id| diagram.node(id)) {
				None => Either::Left(view! {
					<div class="arch-detail-empty">"Select a component to see details"</div>
				}),
				Some(node) => Either::Right(detail_card(diagram, node)),
			}
		}
	};

	view! {
		<section class="architecture-section" node_ref=section_ref>
			<div class="arch-layout">
				<div class="arch-diagram" node_ref=diagram_ref on:click=on_background_click>
					<canvas class="arch-canvas" node_ref=canvas_ref />
					<div class="arch-nodes">
						{diagram
							.nodes
							.iter()
							.map(|node| node_view(diagram, node, state.clone(), rev, repaint.clone()))
							.collect_view()}
					</div>
				</div>
				<aside class="arch-side">
					<div class="arch-legend">
						{diagram
							.groups
							.iter()
							.map(|group| {
								view! {
									<span class="arch-legend-item">
										<span class="arch-legend-dot" style:background=group.color></span>
										{group.label}
									</span>
								}
							})
							.collect_view()}
					</div>
					<div class="arch-detail">{detail}</div>
				</aside>
			</div>
		</section>
	}
}

fn node_view(
	diagram: &'static Diagram,
	node: &'static Node,
	state: Rc<RefCell<DiagramState>>,
	rev: RwSignal<u64>,
	repaint: Rc<dyn Fn()>,
) -> impl IntoView {
	let color = diagram
		.group(node.group)
		.map(|g| g.color)
		.unwrap_or(FALLBACK_COLOR);
	let icon_class = if node.icon == "λ" {
		"arch-node-icon arch-lambda"
	} else {
		"arch-node-icon"
	};

	let (state_sel, state_dim, state_pos) = (state.clone(), state.clone(), state.clone());
	let on_click = move |ev: MouseEvent| {
		ev.stop_propagation();
		state.borrow_mut().toggle_select(node.id);
		repaint();
	};

	// Pixel positions come from the layout cache once the first resize has
	// run; raw percentages cover the frame before that.
	let left = move || {
		rev.track();
		match state_pos.borrow().position(node.id) {
			Some(p) => format!("{}px", p.x),
			None => format!("{}%", node.x),
		}
	};
	let state_top = state_sel.clone();
	let top = move || {
		rev.track();
		match state_top.borrow().position(node.id) {
			Some(p) => format!("{}px", p.y),
			None => format!("{}%", node.y),
		}
	};

	view! {
		<div
			class="arch-node"
			class=("arch-node--selected", move || {
				rev.track();
				state_sel.borrow().is_selected(node.id)
			})
			class=("arch-node--dimmed", move || {
				rev.track();
				state_dim.borrow().is_dimmed(node.id)
			})
			style:left=left
			style:top=top
			on:click=on_click
		>
			<div class="arch-node-ring" style=("--node-color", color)>
				<span class=icon_class>{node.icon}</span>
			</div>
			<span class="arch-node-label">{node.label}</span>
		</div>
	}
}

fn detail_card(diagram: &'static Diagram, node: &'static Node) -> impl IntoView {
	let color = diagram
		.group(node.group)
		.map(|g| g.color)
		.unwrap_or(FALLBACK_COLOR);

	let extra = match node.extra {
		NodeExtra::Endpoints(endpoints) => EitherOf3::A(view! {
			<div class="arch-endpoints">
				{endpoints
					.iter()
					.map(|ep| {
						view! {
							<div class="arch-ep">
								<span class=ep.method.css_class()>{ep.method.as_str()}</span>
								<span class="arch-ep-path">{ep.path}</span>
								<span class="arch-ep-status">"✅"</span>
							</div>
						}
					})
					.collect_view()}
			</div>
		}),
		NodeExtra::Containers(names) => EitherOf3::B(view! {
			<div class="arch-chips">
				{names
					.iter()
					.map(|name| {
						view! {
							<span class="arch-chip" style=("--chip-color", color)>{*name}</span>
						}
					})
					.collect_view()}
			</div>
		}),
		NodeExtra::None => EitherOf3::C(()),
	};

	view! {
		<div class="arch-detail-card" style=("--detail-color", color)>
			<div class="arch-detail-header">
				<span class="arch-detail-icon">{node.icon}</span>
				<div>
					<h3 class="arch-detail-title" style:color=color>{node.label}</h3>
					{node.tech.map(|tech| view! { <p class="arch-detail-tech">{tech}</p> })}
				</div>
			</div>
			<p class="arch-detail-desc">{node.desc}</p>
			{extra}
		</div>
	}
}
