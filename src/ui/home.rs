// SPDX-License-Identifier: MPL-2.0
//! Landing screen: what the test is, how it works, and the language picker.

use super::settings;
use crate::app::{Capabilities, Message, Root};
use crate::i18n::{Args, I18n};
use iced::{
    alignment::Horizontal,
    widget::{Column, Container, Text},
    Element, Length,
};

const APP_TITLE: &str = "ABX";

/// Sample labels substituted into the `help` message.
const SAMPLE_A: &str = "A";
const SAMPLE_B: &str = "B";
const SAMPLE_X: &str = "X";

#[derive(Debug, Default)]
pub struct HomeRoot;

impl HomeRoot {
    /// Localized instructions with the sample labels filled in.
    pub fn help_text(i18n: &I18n) -> String {
        let args = Args::new()
            .with("a", SAMPLE_A)
            .with("b", SAMPLE_B)
            .with("x", SAMPLE_X)
            .with("n", "\n");
        i18n.tr_with("help", &args)
    }
}

impl Root for HomeRoot {
    fn title(&self, capabilities: &Capabilities) -> String {
        format!("{} - {}", APP_TITLE, capabilities.i18n().tr("description"))
    }

    fn view<'a>(&'a self, capabilities: &'a Capabilities) -> Element<'a, Message> {
        let i18n = capabilities.i18n();

        let content = Column::new()
            .spacing(20)
            .align_x(Horizontal::Center)
            .push(Text::new(APP_TITLE).size(40))
            .push(Text::new(i18n.tr("description")).size(20))
            .push(Text::new(Self::help_text(i18n)))
            .push(settings::view_language_picker(capabilities));

        Container::new(content)
            .padding(30)
            .width(Length::Fill)
            .center_x(Length::Fill)
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_text_fills_sample_labels_and_line_break() {
        let i18n = I18n::with_locale("en".into()).expect("embedded catalog should load");
        assert_eq!(
            HomeRoot::help_text(&i18n),
            "You will receive two reference samples, labeled A and B, along with a target sample, X.\n Your task is to determine whether sample X corresponds to sample A or sample B."
        );
    }

    #[test]
    fn help_text_is_localized() {
        let i18n = I18n::with_locale("id".into()).expect("embedded catalog should load");
        assert!(HomeRoot::help_text(&i18n).starts_with("Anda akan menerima dua sampel referensi"));
    }
}
