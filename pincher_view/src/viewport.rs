// Copyright 2025 the Pincher Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};
use pincher_gesture::{
    ContactEvent, GestureConfig, GestureError, GestureObserver, GestureSession,
    GestureSessionDebugInfo, SessionChange, Similarity,
};

use crate::FitMode;

/// A view rectangle showing content that pointers can pinch, rotate and drag.
///
/// `PinchViewport` owns a [`GestureSession`] and translates between three
/// frames:
/// - View space: device coordinates, the frame of `view_rect` and of pointer
///   positions handed to [`PinchViewport::pointer_down`] and friends.
/// - Live space: view space shifted so the view center is the origin. This is
///   the frame the session works in.
/// - Content space: the content's own coordinates, with `(0, 0)` at its top
///   left corner and its center at `size / 2`.
///
/// The session's transform maps content, centered on the origin, into live
/// space. [`PinchViewport::content_to_view`] folds the two re-centering
/// translations in, giving the affine a render layer applies to the content.
#[derive(Clone, Debug)]
pub struct PinchViewport<K> {
    view_rect: Rect,
    content: Option<Size>,
    fit_mode: FitMode,
    session: GestureSession<K>,
}

impl<K: PartialEq> PinchViewport<K> {
    /// Creates an empty viewport covering `view_rect`.
    ///
    /// With no content set, the transform is the identity.
    #[must_use]
    pub fn new(view_rect: Rect) -> Self {
        Self::with_config(view_rect, GestureConfig::default())
    }

    /// Creates an empty viewport whose session uses `config`.
    #[must_use]
    pub fn with_config(view_rect: Rect, config: GestureConfig) -> Self {
        Self {
            view_rect,
            content: None,
            fit_mode: FitMode::default(),
            session: GestureSession::with_config(Similarity::IDENTITY, config),
        }
    }

    /// Returns the view rectangle in device coordinates.
    #[must_use]
    pub fn view_rect(&self) -> Rect {
        self.view_rect
    }

    /// Returns the size of the displayed content, if any.
    #[must_use]
    pub fn content(&self) -> Option<Size> {
        self.content
    }

    /// Returns the fit mode used for the initial transform.
    #[must_use]
    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    /// Sets the fit mode.
    ///
    /// The current transform is left alone. The mode takes effect on the next
    /// [`PinchViewport::set_content`] or [`PinchViewport::refit`], and it
    /// governs how later view resizes rescale the content.
    pub fn set_fit_mode(&mut self, mode: FitMode) {
        self.fit_mode = mode;
    }

    /// Returns the gesture session.
    #[must_use]
    pub fn session(&self) -> &GestureSession<K> {
        &self.session
    }

    /// Replaces the gesture session configuration.
    pub fn set_config(&mut self, config: GestureConfig) {
        self.session.set_config(config);
    }

    /// Returns the current content transform (centered content → live space).
    #[must_use]
    pub fn transform(&self) -> Similarity {
        self.session.transform()
    }

    /// The transform content starts with: a uniform scale chosen by the fit
    /// mode, or the identity when there is no content.
    #[must_use]
    pub fn initial_transform(&self) -> Similarity {
        match self.content {
            Some(content) => Similarity::scale(self.fit_mode.scale(content, self.view_rect.size())),
            None => Similarity::IDENTITY,
        }
    }

    /// Replaces the displayed content.
    ///
    /// Any gesture in progress is dropped and the transform starts over from
    /// [`PinchViewport::initial_transform`].
    pub fn set_content(&mut self, content: Option<Size>) -> SessionChange {
        self.content = content;
        self.refit()
    }

    /// Drops any gesture in progress and restores the initial transform.
    pub fn refit(&mut self) -> SessionChange {
        self.refit_with_observer(&mut ())
    }

    /// [`PinchViewport::refit`], reporting to `observer`.
    pub fn refit_with_observer<O>(&mut self, observer: &mut O) -> SessionChange
    where
        O: GestureObserver<K> + ?Sized,
    {
        let initial = self.initial_transform();
        self.session.reset_with_observer(initial, observer)
    }

    /// Sets the view rectangle.
    ///
    /// The content keeps its zoom relative to the fitted size: the transform
    /// is scaled, in content space, by the ratio of the new fitted height to
    /// the old one. Contacts in progress keep their live positions, so an
    /// ongoing gesture continues from the rescaled transform without a jump.
    ///
    /// Fails with [`GestureError::DegenerateTransform`] if the rescaled
    /// transform cannot be represented or inverted. The new view rectangle is
    /// kept either way; on failure the transform is left as it was.
    pub fn set_view_rect(&mut self, rect: Rect) -> Result<SessionChange, GestureError> {
        if self.view_rect == rect {
            return Ok(SessionChange::empty());
        }
        let old = self.view_rect;
        self.view_rect = rect;
        let Some(content) = self.content else {
            return Ok(SessionChange::empty());
        };

        let ratio = self.fit_mode.rect(content, rect).height()
            / self.fit_mode.rect(content, old).height();
        if !ratio.is_finite() || ratio <= 0.0 {
            return Err(GestureError::DegenerateTransform);
        }
        if ratio == 1.0 {
            return Ok(SessionChange::empty());
        }
        let rescaled = Similarity::scale(ratio).then(self.session.transform());
        self.session.set_transform(rescaled)
    }

    /// Converts a view-space point into the live frame.
    #[must_use]
    pub fn to_live(&self, view_point: Point) -> Point {
        (view_point - self.view_rect.center()).to_point()
    }

    /// Converts a live-frame point back into view space.
    #[must_use]
    pub fn from_live(&self, live_point: Point) -> Point {
        self.view_rect.center() + live_point.to_vec2()
    }

    /// A pointer went down at `view_point`.
    pub fn pointer_down(&mut self, id: K, view_point: Point) -> SessionChange {
        let live = self.to_live(view_point);
        self.session.add_contact(id, live)
    }

    /// A pointer moved to `view_point`.
    pub fn pointer_move(&mut self, id: K, view_point: Point) -> SessionChange {
        let live = self.to_live(view_point);
        self.session.update_contact(id, live)
    }

    /// A pointer went up or was cancelled.
    pub fn pointer_up(&mut self, id: K) -> SessionChange {
        self.session.remove_contact(id)
    }

    /// Applies all pointer events of one input frame, in view space.
    ///
    /// See [`GestureSession::apply_batch_with_observer`] for batching
    /// semantics.
    pub fn apply_frame<I>(&mut self, events: I) -> SessionChange
    where
        I: IntoIterator<Item = ContactEvent<K>>,
    {
        self.apply_frame_with_observer(events, &mut ())
    }

    /// [`PinchViewport::apply_frame`], reporting to `observer`.
    pub fn apply_frame_with_observer<I, O>(&mut self, events: I, observer: &mut O) -> SessionChange
    where
        I: IntoIterator<Item = ContactEvent<K>>,
        O: GestureObserver<K> + ?Sized,
    {
        let center = self.view_rect.center().to_vec2();
        self.session.apply_batch_with_observer(
            events.into_iter().map(|event| to_live_event(event, center)),
            observer,
        )
    }

    /// Affine mapping content space into view space.
    ///
    /// Equal to `translate(view center) · T · translate(−content center)`
    /// where `T` is the session transform.
    #[must_use]
    pub fn content_to_view(&self) -> Affine {
        Affine::translate(self.view_rect.center().to_vec2())
            * self.session.affine()
            * Affine::translate(-self.content_center())
    }

    /// Maps a view-space point onto the content, for hit testing.
    ///
    /// Returns `None` if the current transform cannot be inverted.
    #[must_use]
    pub fn view_to_content(&self, view_point: Point) -> Option<Point> {
        let inverse = self.session.transform().inverse()?;
        Some(inverse.apply(self.to_live(view_point)) + self.content_center())
    }

    /// Snapshot of the viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> PinchViewportDebugInfo {
        PinchViewportDebugInfo {
            view_rect: self.view_rect,
            content: self.content,
            fit_mode: self.fit_mode,
            fitted_rect: self
                .content
                .map(|content| self.fit_mode.rect(content, self.view_rect)),
            session: self.session.debug_info(),
        }
    }

    fn content_center(&self) -> Vec2 {
        self.content.map_or(Vec2::ZERO, |content| content.to_vec2() * 0.5)
    }
}

fn to_live_event<K>(event: ContactEvent<K>, center: Vec2) -> ContactEvent<K> {
    match event {
        ContactEvent::Start(id, point) => ContactEvent::Start(id, point - center),
        ContactEvent::Move(id, point) => ContactEvent::Move(id, point - center),
        ContactEvent::End(id) => ContactEvent::End(id),
    }
}

/// Debug snapshot of a [`PinchViewport`] state.
#[derive(Clone, Copy, Debug)]
pub struct PinchViewportDebugInfo {
    /// Current view rectangle in device coordinates.
    pub view_rect: Rect,
    /// Size of the displayed content, if any.
    pub content: Option<Size>,
    /// Fit mode used for the initial transform.
    pub fit_mode: FitMode,
    /// Where the content sits at its initial transform, in view space.
    pub fitted_rect: Option<Rect>,
    /// State of the underlying gesture session.
    pub session: GestureSessionDebugInfo,
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size};
    use pincher_gesture::{
        ContactEvent, GestureError, GestureNote, GesturePhase, GestureRecorder, SessionChange,
        Similarity,
    };

    use super::PinchViewport;
    use crate::FitMode;

    fn assert_point_close(a: Point, b: Point) {
        assert!((a - b).hypot() < 1e-9, "{a:?} vs {b:?}");
    }

    fn image_viewport() -> PinchViewport<u32> {
        let mut viewport = PinchViewport::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        viewport.set_content(Some(Size::new(400.0, 200.0)));
        viewport
    }

    #[test]
    fn empty_viewport_centers_content_origin() {
        let viewport = PinchViewport::<u32>::new(Rect::new(0.0, 0.0, 200.0, 100.0));
        assert_eq!(viewport.initial_transform(), Similarity::IDENTITY);
        assert_point_close(viewport.content_to_view() * Point::ZERO, Point::new(100.0, 50.0));
    }

    #[test]
    fn live_frame_is_centered_on_view() {
        let viewport = PinchViewport::<u32>::new(Rect::new(100.0, 100.0, 300.0, 200.0));
        assert_eq!(viewport.to_live(Point::new(200.0, 150.0)), Point::ZERO);
        let p = Point::new(120.0, 180.0);
        assert_eq!(viewport.from_live(viewport.to_live(p)), p);
    }

    #[test]
    fn content_starts_fitted_and_centered() {
        let viewport = image_viewport();
        assert_eq!(viewport.transform(), Similarity::scale(2.0));
        let to_view = viewport.content_to_view();
        assert_point_close(to_view * Point::new(200.0, 100.0), Point::new(400.0, 300.0));
        assert_point_close(to_view * Point::ZERO, Point::new(0.0, 100.0));
        assert_point_close(to_view * Point::new(400.0, 200.0), Point::new(800.0, 500.0));
    }

    #[test]
    fn fill_mode_covers_view() {
        let mut viewport = PinchViewport::<u32>::new(Rect::new(0.0, 0.0, 800.0, 600.0));
        viewport.set_fit_mode(FitMode::Fill);
        viewport.set_content(Some(Size::new(400.0, 200.0)));
        assert_eq!(viewport.transform(), Similarity::scale(3.0));
    }

    #[test]
    fn drag_moves_content_with_pointer() {
        let mut viewport = image_viewport();
        viewport.pointer_down(1, Point::new(500.0, 350.0));
        let grabbed = viewport.view_to_content(Point::new(500.0, 350.0)).unwrap();

        viewport.pointer_move(1, Point::new(320.0, 410.0));
        assert_point_close(viewport.content_to_view() * grabbed, Point::new(320.0, 410.0));
        viewport.pointer_up(1);
        assert_eq!(viewport.session().phase(), GesturePhase::Idle);
    }

    #[test]
    fn pinch_keeps_both_grabbed_points_under_pointers() {
        let mut viewport = image_viewport();
        let changes = viewport.apply_frame([
            ContactEvent::Start(1, Point::new(300.0, 300.0)),
            ContactEvent::Start(2, Point::new(500.0, 300.0)),
        ]);
        assert!(changes.contains(SessionChange::ANCHORS));
        let a = viewport.view_to_content(Point::new(300.0, 300.0)).unwrap();
        let b = viewport.view_to_content(Point::new(500.0, 300.0)).unwrap();

        viewport.apply_frame([
            ContactEvent::Move(1, Point::new(250.0, 200.0)),
            ContactEvent::Move(2, Point::new(450.0, 500.0)),
        ]);
        let to_view = viewport.content_to_view();
        assert_point_close(to_view * a, Point::new(250.0, 200.0));
        assert_point_close(to_view * b, Point::new(450.0, 500.0));
    }

    #[test]
    fn resize_keeps_relative_zoom() {
        let mut viewport = image_viewport();
        viewport.pointer_down(1, Point::new(400.0, 300.0));
        viewport.pointer_down(2, Point::new(500.0, 300.0));
        // Zoom in by 1.5 around the view center.
        viewport.pointer_move(2, Point::new(550.0, 300.0));
        viewport.pointer_up(1);
        viewport.pointer_up(2);
        assert!((viewport.transform().scale_factor() - 3.0).abs() < 1e-9);

        // Half the size: the fitted scale halves, and so does the transform.
        let changes = viewport
            .set_view_rect(Rect::new(0.0, 0.0, 400.0, 300.0))
            .unwrap();
        assert!(changes.contains(SessionChange::TRANSFORM));
        assert!((viewport.transform().scale_factor() - 1.5).abs() < 1e-9);
    }

    #[test]
    fn resize_during_gesture_does_not_jump() {
        let mut viewport = image_viewport();
        viewport.pointer_down(1, Point::new(400.0, 300.0));
        viewport.pointer_down(2, Point::new(600.0, 300.0));
        viewport
            .set_view_rect(Rect::new(0.0, 0.0, 400.0, 300.0))
            .unwrap();
        let resized = viewport.transform();
        assert!((resized.scale_factor() - 1.0).abs() < 1e-9);

        // The second pointer reports the same live position in the new frame.
        viewport.pointer_move(2, Point::new(400.0, 150.0));
        let t = viewport.transform();
        assert!((t.u - resized.u).abs() < 1e-9 && (t.v - resized.v).abs() < 1e-9);
        assert!((t.tx - resized.tx).abs() < 1e-9 && (t.ty - resized.ty).abs() < 1e-9);
    }

    #[test]
    fn resize_without_content_only_moves_center() {
        let mut viewport = PinchViewport::<u32>::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let changes = viewport
            .set_view_rect(Rect::new(0.0, 0.0, 300.0, 100.0))
            .unwrap();
        assert!(changes.is_empty());
        assert_eq!(viewport.transform(), Similarity::IDENTITY);
        assert_eq!(viewport.to_live(Point::new(150.0, 50.0)), Point::ZERO);
    }

    #[test]
    fn resize_that_collapses_transform_is_reported() {
        // A huge image squeezed into a tiny view: the fitted scale is already
        // at the edge of what an f64 determinant can hold.
        let mut viewport = PinchViewport::<u32>::new(Rect::new(0.0, 0.0, 1e-150, 1e-150));
        viewport.set_content(Some(Size::new(1e150, 1e150)));
        let before = viewport.transform();
        let revision = viewport.session().revision();

        let err = viewport
            .set_view_rect(Rect::new(0.0, 0.0, 2e-150, 2e-150))
            .unwrap_err();
        assert_eq!(err, GestureError::DegenerateTransform);
        assert_eq!(viewport.transform(), before);
        assert_eq!(viewport.session().revision(), revision);
        assert_eq!(viewport.view_rect(), Rect::new(0.0, 0.0, 2e-150, 2e-150));
    }

    #[test]
    fn set_content_resets_gesture() {
        let mut viewport = image_viewport();
        viewport.pointer_down(1, Point::new(10.0, 10.0));
        let changes = viewport.set_content(Some(Size::new(100.0, 300.0)));
        assert_eq!(changes, SessionChange::TRANSFORM | SessionChange::ANCHORS);
        assert_eq!(viewport.session().phase(), GesturePhase::Idle);
        assert_eq!(viewport.transform(), Similarity::scale(2.0));
    }

    #[test]
    fn refit_notifies_observer() {
        let mut viewport = image_viewport();
        viewport.pointer_down(1, Point::new(500.0, 300.0));
        viewport.pointer_move(1, Point::new(520.0, 310.0));

        let mut recorder = GestureRecorder::new();
        let changes = viewport.refit_with_observer(&mut recorder);
        assert_eq!(changes, SessionChange::TRANSFORM | SessionChange::ANCHORS);
        assert_eq!(viewport.transform(), Similarity::scale(2.0));
        assert_eq!(
            recorder.notes(),
            &[GestureNote::TransformUpdated(Similarity::scale(2.0), changes)]
        );
    }

    #[test]
    fn debug_info_reports_fitted_rect() {
        let viewport = image_viewport();
        let info = viewport.debug_info();
        assert_eq!(info.content, Some(Size::new(400.0, 200.0)));
        assert_eq!(info.fit_mode, FitMode::Fit);
        assert_eq!(info.fitted_rect, Some(Rect::new(0.0, 100.0, 800.0, 500.0)));
        assert_eq!(info.session.phase, GesturePhase::Idle);
    }
}
