// SPDX-License-Identifier: MPL-2.0
//! Language selection row shared by every screen.
//!
//! # Examples
//!
//! ```no_run
//! use abx_tester::app::{Capabilities, Message};
//! use abx_tester::ui::settings;
//! use iced::Element;
//!
//! fn footer(capabilities: &Capabilities) -> Element<'_, Message> {
//!     settings::view_language_picker(capabilities)
//! }
//! ```

use crate::app::{Capabilities, Message};
use crate::i18n::LocaleTag;
use iced::{
    alignment::Vertical,
    widget::{button, Button, Row, Text},
    Element,
};

/// Endonym shown on the button for `locale`, or the raw tag when unknown.
pub fn language_name(locale: &LocaleTag) -> &str {
    match locale.as_str() {
        "en" => "English",
        "id" => "Bahasa Indonesia",
        other => other,
    }
}

pub fn view_language_picker(capabilities: &Capabilities) -> Element<'_, Message> {
    let i18n = capabilities.i18n();
    let mut row = Row::new().spacing(10).align_y(Vertical::Center);

    for locale in i18n.available_locales() {
        let label = Text::new(language_name(&locale).to_string());
        let is_current_locale = i18n.current_locale() == &locale;
        let mut button = Button::new(label).on_press(Message::LanguageSelected(locale));

        if is_current_locale {
            button = button.style(button::primary);
        } else {
            button = button.style(button::secondary);
        }

        row = row.push(button);
    }

    row.into()
}
