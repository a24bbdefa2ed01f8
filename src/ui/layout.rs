use iced::widget::{button, column, container, row, scrollable, text, text_input, Column, Space};
use iced::{Alignment, Element, Length};
use std::collections::HashMap;

use super::card::{picture_card, ImageSlot};
use crate::state::{Picture, ViewMode};
use crate::Message;

/// Cards per row in grid mode
pub const GRID_COLUMNS: usize = 2;

const SPACING: f32 = 8.0;

/// Label of the view toggle: names the mode it switches to
pub fn toggle_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::List => "Сетка",
        ViewMode::Grid => "Список",
    }
}

/// Text shown when no picture is visible
pub fn empty_label(search_query: &str) -> &'static str {
    if search_query.is_empty() {
        "Галерея пуста"
    } else {
        "Ничего не найдено"
    }
}

/// Search box, view toggle and clear-all button
pub fn toolbar<'a>(search_query: &'a str, mode: ViewMode) -> Element<'a, Message> {
    row![
        text_input("Поиск по автору", search_query)
            .on_input(Message::SearchChanged)
            .padding(10)
            .width(Length::Fill),
        button(toggle_label(mode))
            .on_press(Message::ToggleViewMode)
            .style(button::text),
        button("Очистить всё")
            .on_press(Message::ClearAll)
            .style(button::danger),
    ]
    .spacing(SPACING)
    .align_y(Alignment::Center)
    .into()
}

/// The visible pictures as a list or grid, or the empty-state text
pub fn pictures<'a>(
    visible: Vec<&'a Picture>,
    mode: ViewMode,
    search_query: &str,
    images: &'a HashMap<String, ImageSlot>,
    image_height: f32,
) -> Element<'a, Message> {
    if visible.is_empty() {
        return container(text(empty_label(search_query)).size(18))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    }

    let card = |picture: &'a Picture| picture_card(picture, images.get(&picture.url), image_height);

    let content: Column<'a, Message> = match mode {
        ViewMode::List => Column::with_children(visible.into_iter().map(card)),
        ViewMode::Grid => Column::with_children(visible.chunks(GRID_COLUMNS).map(|chunk| {
            let mut cells = row![].spacing(SPACING);
            for picture in chunk {
                cells = cells.push(container(card(*picture)).width(Length::FillPortion(1)));
            }
            // Keep a lone last card at half width
            for _ in chunk.len()..GRID_COLUMNS {
                cells = cells.push(Space::with_width(Length::FillPortion(1)));
            }
            Element::from(cells)
        })),
    };

    scrollable(content.spacing(SPACING).width(Length::Fill))
        .height(Length::Fill)
        .into()
}

/// Floating add button
pub fn add_button<'a>() -> Element<'a, Message> {
    button(text("+").size(28))
        .on_press(Message::AddPicture)
        .padding([8, 20])
        .style(button::primary)
        .into()
}

/// Whole screen: toolbar and pictures, with the add button over the bottom-right corner
pub fn screen<'a>(
    toolbar: Element<'a, Message>,
    pictures: Element<'a, Message>,
) -> Element<'a, Message> {
    let body = column![toolbar, pictures].spacing(16).padding(16);

    let fab = container(add_button())
        .width(Length::Fill)
        .height(Length::Fill)
        .align_right(Length::Fill)
        .align_bottom(Length::Fill)
        .padding(24);

    iced::widget::stack![body, fab].into()
}
