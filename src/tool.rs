//! The planer tool: host-event dispatch over the INIT → TAGGING →
//! ORIENTING state machine.
//!
//! All entry points run to completion inside one host callback; there is
//! no background work and no blocking. Invalid or non-vertex picks are
//! not errors: every pick-consuming operation simply leaves state
//! unchanged.

use crate::commit;
use crate::float_types::Real;
use crate::host::{
    Color, Document, DrawingContext, Key, PointStyle, SettingsPrompt, StrokeStyle, View,
};
use crate::orientation::OrientationBasis;
use crate::session::{State, ToolSession};
use log::debug;

/// Drawn marker size for tagged points and the centroid.
const POINT_SIZE: u32 = 10;

/// The interactive plane tool for one document.
#[derive(Debug, Clone, Default)]
pub struct PlanerTool {
    session: ToolSession,
}

impl PlanerTool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: ToolSession) -> Self {
        PlanerTool { session }
    }

    pub fn session(&self) -> &ToolSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut ToolSession {
        &mut self.session
    }

    /// Tool selected by the user. Resumes the kept session; only the
    /// prompt is refreshed.
    pub fn activate(&mut self, view: &mut dyn View) {
        debug!("planer activated");
        self.update_prompt(view);
        view.invalidate();
    }

    /// Tool deselected. The transient preview must not outlive the tool.
    pub fn deactivate(&mut self, view: &mut dyn View, document: &mut dyn Document) {
        debug!("planer deactivated");
        self.remove_preview(document);
        view.invalidate();
    }

    /// Run the settings dialog and merge the result. Cancel keeps the
    /// prior configuration.
    pub fn show_settings(&mut self, dialog: &mut dyn SettingsPrompt) {
        if let Some(input) = dialog.prompt(&self.session.settings) {
            self.session.settings.apply(input);
        }
    }

    pub fn on_mouse_move(&mut self, view: &mut dyn View, x: Real, y: Real) {
        let Some(pick) = view.pick(x, y) else {
            return;
        };
        match &self.session.state {
            State::Init => {},
            State::Tagging => {
                if let Some(snap) = pick.vertex_snap()
                    && self.session.accumulator.add_to_plane(
                        &snap.graph,
                        snap.vertex,
                        &snap.transform,
                        &self.session.settings,
                    )
                {
                    view.invalidate();
                }
            },
            State::Orienting { .. } => {
                let basis = self.session.accumulator.fit().and_then(|fit| {
                    OrientationBasis::update(
                        fit,
                        &pick.position,
                        self.session.accumulator.points(),
                    )
                });
                self.session.state = State::Orienting { basis };
                view.invalidate();
            },
        }
    }

    pub fn on_lbutton_down(
        &mut self,
        view: &mut dyn View,
        document: &mut dyn Document,
        x: Real,
        y: Real,
    ) {
        match &self.session.state {
            State::Init | State::Tagging => {
                let Some(pick) = view.pick(x, y) else {
                    return;
                };
                let Some(snap) = pick.vertex_snap() else {
                    view.set_status("No vertex under cursor");
                    return;
                };
                if self.session.accumulator.add_to_plane(
                    &snap.graph,
                    snap.vertex,
                    &snap.transform,
                    &self.session.settings,
                ) {
                    view.invalidate();
                }
                let next = match self.session.state {
                    State::Init => State::Tagging,
                    _ => State::Init,
                };
                self.set_state(next, view);
            },
            State::Orienting { .. } => self.commit(view, document),
        }
    }

    pub fn on_key_down(&mut self, view: &mut dyn View, document: &mut dyn Document, key: Key) {
        match key {
            Key::Enter => match &self.session.state {
                State::Init => {},
                State::Tagging => {
                    if self.session.plane_defined() {
                        self.set_state(State::Orienting { basis: None }, view);
                    }
                },
                State::Orienting { .. } => self.commit(view, document),
            },
            Key::Escape => match &self.session.state {
                State::Init | State::Tagging => {
                    debug!("discard plane");
                    self.session.reset_geometry();
                    self.set_state(State::Init, view);
                    view.invalidate();
                },
                State::Orienting { .. } => {
                    debug!("drop orientation");
                    self.set_state(State::Tagging, view);
                    view.invalidate();
                },
            },
            Key::Alt => self.show_preview(document),
            Key::Other(code) => debug!("ignored key {code}"),
        }
    }

    pub fn on_key_up(&mut self, document: &mut dyn Document, key: Key) {
        if key == Key::Alt {
            self.remove_preview(document);
        }
    }

    /// Render the session overlay.
    pub fn draw(&self, ctx: &mut dyn DrawingContext) {
        let accumulator = &self.session.accumulator;
        if accumulator.is_empty() {
            return;
        }
        ctx.draw_points(accumulator.points(), POINT_SIZE, PointStyle::Star, Color::GREEN);

        let Some(fit) = accumulator.fit() else {
            return;
        };
        let length = self.session.settings.normal_length;
        ctx.draw_points(
            &[fit.projected_centroid],
            POINT_SIZE,
            PointStyle::OpenSquare,
            Color::BLUE,
        );
        ctx.set_color(Color::BLUE);
        ctx.set_stroke(StrokeStyle::Dashed);
        ctx.draw_line(
            fit.projected_centroid,
            fit.projected_centroid + fit.normal * length,
        );

        if let State::Orienting { basis: Some(basis) } = &self.session.state {
            ctx.set_stroke(StrokeStyle::Solid);
            let mut outline = basis.rect.corners.to_vec();
            outline.push(basis.rect.corners[0]);
            ctx.set_color(Color::BLUE);
            ctx.draw_polyline(&outline);
            ctx.set_color(Color::RED);
            ctx.draw_line(basis.origin, basis.origin + basis.x_axis * length);
            ctx.set_color(Color::GREEN);
            ctx.draw_line(basis.origin, basis.origin + basis.y_axis * length);
        }
    }

    /// Only reachable from ORIENTING. A basis that never got derived
    /// (pointer never moved, or degenerate reference) refuses the commit
    /// and stays put.
    fn commit(&mut self, view: &mut dyn View, document: &mut dyn Document) {
        let State::Orienting { basis: Some(basis) } = &self.session.state else {
            return;
        };
        commit::materialize(document, &self.session.target, basis, &self.session.settings);
        self.remove_preview(document);
        self.session.reset_geometry();
        self.set_state(State::Init, view);
        view.invalidate();
    }

    fn show_preview(&mut self, document: &mut dyn Document) {
        if self.session.preview.is_some() {
            return;
        }
        let Some(fit) = self.session.accumulator.fit() else {
            return;
        };
        let corners = if let State::Orienting { basis: Some(basis) } = &self.session.state {
            basis.rect.corners
        } else {
            // No orientation yet: a square patch about the projected
            // centroid, twice the display length on each side.
            let (u, v) = fit.plane.tangent_basis();
            let extent = 2.0 * self.session.settings.normal_length;
            let origin = fit.projected_centroid;
            [
                origin - u * extent - v * extent,
                origin + u * extent - v * extent,
                origin + u * extent + v * extent,
                origin - u * extent + v * extent,
            ]
        };
        debug!("show plane preview");
        self.session.preview = Some(document.add_preview_face(&corners));
    }

    fn remove_preview(&mut self, document: &mut dyn Document) {
        if let Some(preview) = self.session.preview.take() {
            debug!("hide plane preview");
            document.remove_preview(preview);
        }
    }

    fn set_state(&mut self, state: State, view: &mut dyn View) {
        self.session.state = state;
        self.update_prompt(view);
    }

    fn update_prompt(&self, view: &mut dyn View) {
        let prompt = match &self.session.state {
            State::Init => "Click a vertex to start tagging vertices",
            State::Tagging => {
                "Move mouse to tag vertices. Click a vertex to stop tagging. \
                 Press <Enter> to orient the plane, <Esc> to start over."
            },
            State::Orienting { .. } => {
                "Move mouse to orient the plane. Click or press <Enter> to commit, \
                 <Esc> to return to tagging."
            },
        };
        view.set_status(prompt);
    }
}
