/// Generic dialog chrome: title bar with a close button, body, footer
///
/// The backdrop swallows clicks without closing, so the dialog is only
/// dismissed through its own controls.
use iced::widget::{button, center, column, container, horizontal_space, opaque, row, stack, text};
use iced::{Color, Element, Length};

/// Draw `dialog` centred over `base`, dimming everything behind it
pub fn modal<'a, Message>(
    base: impl Into<Element<'a, Message>>,
    dialog: impl Into<Element<'a, Message>>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let base: Element<'a, Message> = base.into();
    let dialog: Element<'a, Message> = dialog.into();

    let backdrop = center(opaque(dialog)).style(|_theme| container::Style {
        background: Some(
            Color {
                a: 0.6,
                ..Color::BLACK
            }
            .into(),
        ),
        ..container::Style::default()
    });

    stack![base, opaque(backdrop)].into()
}

/// Assemble the dialog box itself
pub fn dialog<'a, Message>(
    title: &'a str,
    body: impl Into<Element<'a, Message>>,
    footer: Option<Element<'a, Message>>,
    on_close: Option<Message>,
) -> Element<'a, Message>
where
    Message: Clone + 'a,
{
    let header = row![
        text(title).size(20),
        horizontal_space(),
        button(text("×").size(18))
            .style(button::text)
            .on_press_maybe(on_close),
    ]
    .align_y(iced::Alignment::Center);

    let body: Element<'a, Message> = body.into();
    let mut content = column![header, body].spacing(16);
    if let Some(footer) = footer {
        content = content.push(footer);
    }

    container(content)
        .width(Length::Fixed(420.0))
        .padding(20)
        .style(container::rounded_box)
        .into()
}
