//! Small reusable widget builders shared by the shell and the dialog

use crate::gui::theme;
use iced::widget::{button, container, pick_list, text};
use iced::{Element, Length};

/// Compact toolbar button; disabled when no message is supplied
pub fn toolbar_button<'a, M: Clone + 'a>(label: &'a str, on_press: Option<M>) -> Element<'a, M> {
    button(text(label).size(14))
        .padding([6, 12])
        .style(iced::theme::Button::Secondary)
        .on_press_maybe(on_press)
        .into()
}

/// A format or quality selector.
///
/// iced's pick list has no disabled state, so a disabled selector renders as
/// a dimmed read-out of the current choice instead.
pub fn selector<'a, T, M>(
    options: Vec<T>,
    selected: Option<T>,
    enabled: bool,
    on_select: impl Fn(T) -> M + 'a,
) -> Element<'a, M>
where
    T: ToString + PartialEq + Clone + 'static,
    M: Clone + 'a,
{
    if enabled {
        pick_list(options, selected, on_select)
            .text_size(14)
            .padding([6, 10])
            .width(Length::Fixed(160.0))
            .into()
    } else {
        let label = selected
            .map(|value| value.to_string())
            .unwrap_or_else(|| "—".to_string());
        container(
            text(label)
                .size(14)
                .style(iced::theme::Text::Color(theme::TEXT_MUTED)),
        )
        .padding([6, 10])
        .width(Length::Fixed(160.0))
        .into()
    }
}
