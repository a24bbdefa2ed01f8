//! Picture card: image on top, author label below.
//! Pressing the card removes the picture.
use iced::font::{Font, Weight};
use iced::widget::{button, column, container, image, text};
use iced::{ContentFit, Element, Length};

use crate::state::Picture;
use crate::Message;

/// Display state of a single picture's image
#[derive(Debug, Clone)]
pub enum ImageSlot {
    /// Fetch requested, nothing to show yet
    Loading,
    Ready(image::Handle),
    /// Fetch failed; a placeholder is shown instead
    Failed,
}

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

pub fn picture_card<'a>(
    picture: &'a Picture,
    slot: Option<&'a ImageSlot>,
    image_height: f32,
) -> Element<'a, Message> {
    let picture_area: Element<'a, Message> = match slot {
        Some(ImageSlot::Ready(handle)) => image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(image_height))
            .content_fit(ContentFit::Cover)
            .into(),
        Some(ImageSlot::Failed) => placeholder("⚠", image_height),
        Some(ImageSlot::Loading) | None => placeholder("…", image_height),
    };

    let content = column![
        picture_area,
        text(&picture.author).size(16).font(BOLD),
    ]
    .spacing(8)
    .width(Length::Fill);

    button(content)
        .on_press(Message::RemovePicture(picture.id))
        .padding(8)
        .width(Length::Fill)
        .style(button::secondary)
        .into()
}

fn placeholder<'a>(label: &'a str, height: f32) -> Element<'a, Message> {
    container(text(label).size(24))
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(height))
        .into()
}
