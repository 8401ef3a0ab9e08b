use std::{rc::Rc, time::Duration};

use gpui::{prelude::*, *};

use crate::{
    archive::SliderArchive,
    color::TrackColors,
    defaults,
    gesture::{GestureState, GradientSliderEvent},
    image::SliderImage,
    model::SliderModel,
    thumb::SliderThumb,
    track::gradient_track,
};

/// The single action slot of a slider.
///
/// Receives the slider, and the same events that are emitted to subscribers.
pub type SliderActionHandler =
    Rc<dyn Fn(Entity<GradientSliderState>, &GradientSliderEvent, &mut App) + 'static>;

#[derive(Clone)]
struct GradientSliderDrag(EntityId);

impl Render for GradientSliderDrag {
    fn render(&mut self, _: &mut Window, _: &mut Context<Self>) -> impl IntoElement {
        Empty
    }
}

/// A pending animated thumb move, from the origin the thumb had before.
#[derive(Clone, Copy, Debug, PartialEq)]
struct ThumbMotion {
    from: Point<Pixels>,
    generation: u64,
}

/// State for [`GradientSlider`].
pub struct GradientSliderState {
    pub id: SharedString,
    model: SliderModel,
    on_action: Option<SliderActionHandler>,
    origin: Point<Pixels>,
    motion: Option<ThumbMotion>,
    motion_generation: u64,
}

impl GradientSliderState {
    pub fn new(id: impl Into<SharedString>) -> Self {
        Self::with_model(id, SliderModel::new())
    }

    pub fn with_model(id: impl Into<SharedString>, model: SliderModel) -> Self {
        Self {
            id: id.into(),
            model,
            on_action: None,
            origin: Point::default(),
            motion: None,
            motion_generation: 0,
        }
    }

    /// Restore a slider from its persisted form.
    pub fn from_archive(id: impl Into<SharedString>, archive: &SliderArchive) -> Self {
        Self::with_model(id, archive.to_model())
    }

    /// Set the minimum value of the slider, default: 0.0
    pub fn min(mut self, min: f32) -> Self {
        self.model.set_minimum_value(min);
        self
    }

    /// Set the maximum value of the slider, default: 1.0
    pub fn max(mut self, max: f32) -> Self {
        self.model.set_maximum_value(max);
        self
    }

    /// Set both bounds of the slider, default: 0.0..1.0
    pub fn range(mut self, min: f32, max: f32) -> Self {
        self.model.set_range(min, max);
        self
    }

    /// Set the initial value of the slider, default: 0.0
    pub fn default_value(mut self, value: f32) -> Self {
        self.model.set_value(value);
        self
    }

    pub fn thickness(mut self, thickness: f32) -> Self {
        self.model.set_thickness(thickness);
        self
    }

    pub fn thumb_size(mut self, thumb_size: f32) -> Self {
        self.model.set_thumb_size(thumb_size);
        self
    }

    pub fn colors(mut self, min_color: impl Into<Hsla>, max_color: impl Into<Hsla>) -> Self {
        let colors = self.model.colors_mut();
        colors.set_min_color(min_color);
        colors.set_max_color(max_color);
        self
    }

    pub fn rainbow(mut self, has_rainbow: bool) -> Self {
        self.model.colors_mut().set_has_rainbow(has_rainbow);
        self
    }

    /// When `false`, a drag only reports the value on release, default: true
    pub fn continuous(mut self, continuous: bool) -> Self {
        self.model.set_continuous(continuous);
        self
    }

    pub fn min_image(mut self, image: SliderImage) -> Self {
        self.model.set_min_image(Some(image));
        self
    }

    pub fn max_image(mut self, image: SliderImage) -> Self {
        self.model.set_max_image(Some(image));
        self
    }

    pub fn thumb_icon(mut self, icon: SliderImage) -> Self {
        self.model.set_thumb_icon(Some(icon));
        self
    }

    pub fn thumb_color(mut self, color: impl Into<Hsla>) -> Self {
        self.model.set_thumb_color(color);
        self
    }

    pub fn track_border(mut self, color: impl Into<Hsla>, width: f32) -> Self {
        self.model.set_track_border(color, width);
        self
    }

    pub fn on_action(
        mut self,
        handler: impl Fn(Entity<GradientSliderState>, &GradientSliderEvent, &mut App) + 'static,
    ) -> Self {
        self.on_action = Some(Rc::new(handler));
        self
    }

    pub fn model(&self) -> &SliderModel {
        &self.model
    }

    pub fn value(&self) -> f32 {
        self.model.value()
    }

    /// Position of the value inside the range, from 0.0 to 1.0.
    pub fn value_percent(&self) -> f32 {
        self.model.value_percent()
    }

    pub fn track_colors(&self) -> &TrackColors {
        self.model.colors()
    }

    /// Sample the track gradient at `position` (0.0 to 1.0).
    pub fn color_at(&self, position: f32) -> Hsla {
        self.model.colors().color_at(position)
    }

    /// Insets hosts may use to align the slider with neighbouring controls.
    pub fn alignment_insets(&self) -> Edges<Pixels> {
        Edges {
            top: px(4.),
            right: px(2.),
            bottom: px(4.),
            left: px(2.),
        }
    }

    pub fn archive(&self) -> SliderArchive {
        SliderArchive::from_model(&self.model)
    }

    pub fn restore(&mut self, archive: &SliderArchive, cx: &mut Context<Self>) {
        archive.apply_to(&mut self.model);
        self.motion = None;
        cx.notify();
    }

    /// Set the value, sliding the thumb there when `animated`.
    pub fn set_value(&mut self, value: f32, animated: bool, cx: &mut Context<Self>) {
        let from = self.model.layout().thumb.origin;
        self.model.set_value(value);

        self.motion = if animated && from != self.model.layout().thumb.origin {
            self.motion_generation += 1;
            Some(ThumbMotion {
                from,
                generation: self.motion_generation,
            })
        } else {
            None
        };
        cx.notify();
    }

    pub fn set_minimum_value(&mut self, minimum: f32, cx: &mut Context<Self>) {
        self.model.set_minimum_value(minimum);
        self.motion = None;
        cx.notify();
    }

    pub fn set_maximum_value(&mut self, maximum: f32, cx: &mut Context<Self>) {
        self.model.set_maximum_value(maximum);
        self.motion = None;
        cx.notify();
    }

    pub fn set_range(&mut self, minimum: f32, maximum: f32, cx: &mut Context<Self>) {
        self.model.set_range(minimum, maximum);
        self.motion = None;
        cx.notify();
    }

    pub fn set_min_color(&mut self, color: impl Into<Hsla>, cx: &mut Context<Self>) {
        self.update_colors(cx, |colors| colors.set_min_color(color));
    }

    pub fn set_max_color(&mut self, color: impl Into<Hsla>, cx: &mut Context<Self>) {
        self.update_colors(cx, |colors| colors.set_max_color(color));
    }

    pub fn set_has_rainbow(&mut self, has_rainbow: bool, cx: &mut Context<Self>) {
        self.update_colors(cx, |colors| colors.set_has_rainbow(has_rainbow));
    }

    pub fn set_gradient_varying_hue(
        &mut self,
        saturation: f32,
        brightness: f32,
        cx: &mut Context<Self>,
    ) {
        self.update_colors(cx, |colors| {
            colors.set_gradient_varying_hue(saturation, brightness)
        });
    }

    pub fn set_gradient_varying_saturation(
        &mut self,
        hue: f32,
        brightness: f32,
        cx: &mut Context<Self>,
    ) {
        self.update_colors(cx, |colors| {
            colors.set_gradient_varying_saturation(hue, brightness)
        });
    }

    pub fn set_gradient_varying_brightness(
        &mut self,
        hue: f32,
        saturation: f32,
        cx: &mut Context<Self>,
    ) {
        self.update_colors(cx, |colors| {
            colors.set_gradient_varying_brightness(hue, saturation)
        });
    }

    pub fn set_gradient_varying_red(&mut self, green: f32, blue: f32, cx: &mut Context<Self>) {
        self.update_colors(cx, |colors| colors.set_gradient_varying_red(green, blue));
    }

    pub fn set_gradient_varying_green(&mut self, red: f32, blue: f32, cx: &mut Context<Self>) {
        self.update_colors(cx, |colors| colors.set_gradient_varying_green(red, blue));
    }

    pub fn set_gradient_varying_blue(&mut self, red: f32, green: f32, cx: &mut Context<Self>) {
        self.update_colors(cx, |colors| colors.set_gradient_varying_blue(red, green));
    }

    pub fn set_gradient_for_grayscale(&mut self, cx: &mut Context<Self>) {
        self.update_colors(cx, |colors| colors.set_gradient_for_grayscale());
    }

    pub fn set_continuous(&mut self, continuous: bool, _: &mut Context<Self>) {
        self.model.set_continuous(continuous);
    }

    pub fn set_thickness(&mut self, thickness: f32, cx: &mut Context<Self>) {
        self.model.set_thickness(thickness);
        cx.notify();
    }

    pub fn set_thumb_size(&mut self, thumb_size: f32, cx: &mut Context<Self>) {
        self.model.set_thumb_size(thumb_size);
        cx.notify();
    }

    pub fn set_min_image(&mut self, image: Option<SliderImage>, cx: &mut Context<Self>) {
        self.model.set_min_image(image);
        cx.notify();
    }

    pub fn set_max_image(&mut self, image: Option<SliderImage>, cx: &mut Context<Self>) {
        self.model.set_max_image(image);
        cx.notify();
    }

    pub fn set_thumb_icon(&mut self, icon: Option<SliderImage>, cx: &mut Context<Self>) {
        self.model.set_thumb_icon(icon);
        cx.notify();
    }

    /// Fill the thumb with `color`; this removes any thumb icon.
    pub fn set_thumb_color(&mut self, color: impl Into<Hsla>, cx: &mut Context<Self>) {
        self.model.set_thumb_color(color);
        cx.notify();
    }

    pub fn set_track_border(&mut self, color: impl Into<Hsla>, width: f32, cx: &mut Context<Self>) {
        self.model.set_track_border(color, width);
        cx.notify();
    }

    pub fn set_on_action(&mut self, handler: Option<SliderActionHandler>) {
        self.on_action = handler;
    }

    /// Record where the slider was laid out; re-lays out the nodes on resize.
    pub fn set_bounds(&mut self, bounds: Bounds<Pixels>, cx: &mut Context<Self>) {
        self.origin = bounds.origin;
        if self.model.set_view_size(bounds.size) {
            self.motion = None;
            cx.notify();
        }
    }

    /// Pointer-down at a window position.
    pub fn pointer_down(&mut self, position: Point<Pixels>, cx: &mut Context<Self>) {
        let local = position - self.origin;
        if let Some(event) = self.model.pointer_down(local) {
            self.motion = None;
            self.dispatch(event, cx);
        }
    }

    pub fn pointer_move(&mut self, position: Point<Pixels>, cx: &mut Context<Self>) {
        if self.model.gesture_state() != GestureState::Tracking {
            return;
        }

        let local = position - self.origin;
        if let Some(event) = self.model.pointer_move(local) {
            self.dispatch(event, cx);
        }
        cx.notify();
    }

    pub fn pointer_up(&mut self, position: Option<Point<Pixels>>, cx: &mut Context<Self>) {
        let origin = self.origin;
        let events = self.model.pointer_up(position.map(|position| position - origin));
        if events.is_empty() {
            return;
        }

        for event in events {
            self.dispatch(event, cx);
        }
        cx.notify();
    }

    fn update_colors(&mut self, cx: &mut Context<Self>, f: impl FnOnce(&mut TrackColors)) {
        f(self.model.colors_mut());
        cx.notify();
    }

    fn dispatch(&self, event: GradientSliderEvent, cx: &mut Context<Self>) {
        if let Some(on_action) = self.on_action.clone() {
            // Deferred so the handler may update this slider.
            let entity = cx.entity();
            cx.defer(move |cx| on_action(entity, &event, cx));
        }
        cx.emit(event);
    }
}

impl EventEmitter<GradientSliderEvent> for GradientSliderState {}

impl Render for GradientSliderState {
    fn render(&mut self, _: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        GradientSlider::new(&cx.entity())
    }
}

/// A slider whose track is filled with a color gradient.
#[derive(IntoElement)]
pub struct GradientSlider {
    state: Entity<GradientSliderState>,
}

impl GradientSlider {
    pub fn new(state: &Entity<GradientSliderState>) -> Self {
        Self {
            state: state.clone(),
        }
    }

    fn end_cap(image: &SliderImage, bounds: Bounds<Pixels>) -> Img {
        img(image.source.clone())
            .absolute()
            .left(bounds.origin.x)
            .top(bounds.origin.y)
            .w(bounds.size.width)
            .h(bounds.size.height)
    }

    fn thumb_element(state: &GradientSliderState) -> AnyElement {
        let model = &state.model;
        let thumb = model.layout().thumb;

        let element = div()
            .absolute()
            .left(thumb.origin.x)
            .top(thumb.origin.y)
            .child(
                SliderThumb::new(px(model.thumb_size()))
                    .color(model.thumb_color())
                    .icon(model.thumb_icon().cloned()),
            );

        match state.motion {
            Some(motion) => {
                let to = thumb.origin.x;
                element
                    .with_animation(
                        ElementId::NamedInteger("gradient-slider-thumb".into(), motion.generation),
                        Animation::new(Duration::from_secs_f64(defaults::THUMB_ANIMATION_SECS))
                            .with_easing(ease_in_out),
                        move |this, delta| this.left(motion.from.x + (to - motion.from.x) * delta),
                    )
                    .into_any_element()
            }
            None => element.into_any_element(),
        }
    }

    fn bounds_handler(
        state_entity: Entity<GradientSliderState>,
    ) -> impl FnOnce(Bounds<Pixels>, &mut Window, &mut App) + 'static {
        move |bounds: Bounds<Pixels>, _: &mut Window, cx: &mut App| {
            state_entity.update(cx, |state, cx| state.set_bounds(bounds, cx))
        }
    }

    fn attach_pointer_interactions(
        root: Stateful<Div>,
        state_entity: Entity<GradientSliderState>,
        drag_id: EntityId,
        window: &mut Window,
    ) -> Stateful<Div> {
        root.child(
            canvas(Self::bounds_handler(state_entity.clone()), {
                let state_entity = state_entity.clone();
                move |_, _, window, _cx| {
                    window.on_mouse_event({
                        let state_entity = state_entity.clone();
                        move |ev: &MouseUpEvent, phase, _, cx| {
                            if !phase.bubble() || ev.button != MouseButton::Left {
                                return;
                            }
                            state_entity.update(cx, |state, cx| {
                                state.pointer_up(Some(ev.position), cx);
                            });
                        }
                    });
                }
            })
            .absolute()
            .inset_0(),
        )
        .on_mouse_down(
            MouseButton::Left,
            window.listener_for(
                &state_entity,
                |state: &mut GradientSliderState,
                 ev: &MouseDownEvent,
                 _: &mut Window,
                 cx: &mut Context<GradientSliderState>| {
                    state.pointer_down(ev.position, cx);
                },
            ),
        )
        .on_drag(GradientSliderDrag(drag_id), |drag, _, _, cx| {
            cx.stop_propagation();
            cx.new(|_| drag.clone())
        })
        .on_drag_move(window.listener_for(
            &state_entity,
            move |state: &mut GradientSliderState,
                  ev: &DragMoveEvent<GradientSliderDrag>,
                  _: &mut Window,
                  cx: &mut Context<GradientSliderState>| {
                if ev.drag(cx).0 != drag_id {
                    return;
                }
                state.pointer_move(ev.event.position, cx);
            },
        ))
    }
}

impl RenderOnce for GradientSlider {
    fn render(self, window: &mut Window, cx: &mut App) -> impl IntoElement {
        let state_entity = self.state.clone();
        let entity_id = state_entity.entity_id();
        let state = state_entity.read(cx);
        let model = &state.model;
        let layout = model.layout().clone();

        let track = gradient_track(
            model.stops().to_vec(),
            layout.track,
            model.track_border_color(),
            px(model.track_border_width()),
        );

        let root = div()
            .id(state.id.clone())
            .relative()
            .w_full()
            .h(px(model.intrinsic_height()))
            .when_some(
                model.min_image().cloned().zip(layout.min_image),
                |this, (image, bounds)| this.child(Self::end_cap(&image, bounds)),
            )
            .when_some(
                model.max_image().cloned().zip(layout.max_image),
                |this, (image, bounds)| this.child(Self::end_cap(&image, bounds)),
            )
            .child(track)
            .child(Self::thumb_element(state));

        Self::attach_pointer_interactions(root, state_entity.clone(), entity_id, window)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use core::prelude::v1::test;

    #[gpui::test]
    fn action_handler_and_subscribers_see_the_same_events(cx: &mut TestAppContext) {
        let handled = Rc::new(RefCell::new(Vec::new()));
        let broadcast = Rc::new(RefCell::new(Vec::new()));

        let slider = cx.new(|_| {
            let handled = handled.clone();
            GradientSliderState::new("hue")
                .continuous(false)
                .on_action(move |_, event, _| handled.borrow_mut().push(*event))
        });

        cx.update(|cx| {
            let broadcast = broadcast.clone();
            cx.subscribe(&slider, move |_, event: &GradientSliderEvent, _| {
                broadcast.borrow_mut().push(*event)
            })
            .detach();
        });

        slider.update(cx, |state, cx| {
            state.set_bounds(Bounds::new(point(px(10.), px(0.)), size(px(232.), px(28.))), cx);
            let thumb = state.model().layout().thumb_center();
            state.pointer_down(point(thumb.x + px(10.), thumb.y), cx);
            state.pointer_move(point(px(126.), px(14.)), cx);
            state.pointer_up(Some(point(px(176.), px(14.))), cx);
        });
        cx.run_until_parked();

        let handled = handled.borrow();
        assert_eq!(handled.as_slice(), broadcast.borrow().as_slice());
        assert_eq!(
            handled.as_slice(),
            &[
                GradientSliderEvent::TrackBegan { value: 0.0 },
                GradientSliderEvent::Change {
                    value: 0.75,
                    is_final: true
                },
                GradientSliderEvent::TrackEnded { value: 0.75 },
            ]
        );
    }

    #[gpui::test]
    fn handler_may_update_the_slider(cx: &mut TestAppContext) {
        let slider = cx.new(|_| {
            GradientSliderState::new("hue")
                .thumb_icon(SliderImage::new("thumb.png", 12., 12.))
                .on_action(|slider, event, cx| {
                    let color = crate::color::hsb(event.value(), 1.0, 1.0);
                    slider.update(cx, |state, cx| state.set_thumb_color(color, cx));
                })
        });

        slider.update(cx, |state, cx| {
            state.set_bounds(Bounds::new(point(px(0.), px(0.)), size(px(232.), px(28.))), cx);
            let thumb = state.model().layout().thumb_center();
            state.pointer_down(thumb, cx);
            state.pointer_up(None, cx);
        });
        cx.run_until_parked();

        slider.read_with(cx, |state, _| {
            assert!(state.model().thumb_icon().is_none());
        });
    }

    #[gpui::test]
    fn animated_value_change_records_the_previous_position(cx: &mut TestAppContext) {
        let slider = cx.new(|_| GradientSliderState::new("value"));

        slider.update(cx, |state, cx| {
            state.set_bounds(Bounds::new(point(px(0.), px(0.)), size(px(232.), px(28.))), cx);
            let before = state.model().layout().thumb.origin;

            state.set_value(0.5, true, cx);
            assert_eq!(state.motion.map(|motion| motion.from), Some(before));

            state.set_value(0.25, false, cx);
            assert_eq!(state.motion, None);
            assert_eq!(state.value(), 0.25);
        });
    }
}
