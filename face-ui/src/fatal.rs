//! Last-resort screen for a face that failed to start

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::primitives::{Line, Primitive, PrimitiveStyle, Rectangle};
use embedded_graphics::Drawable;
use embedded_text::style::{HeightMode, TextBoxStyleBuilder};
use embedded_text::TextBox;
use heapless::String;
use u8g2_fonts::types::{FontColor, HorizontalAlignment, VerticalPosition};
use u8g2_fonts::U8g2TextStyle;
use ufmt::uwrite;

use crate::config::{COLOR_FATAL, COLOR_FATAL_TEXT, COLOR_VERSION};
use crate::fonts::{TinyFont, SMALL_FONT, TINY_FONT};
use crate::{FaceDrawTarget, FaceError};

/// Paint a red error screen describing `error`. Drawing errors are ignored:
/// there is nothing left to report them to.
pub fn draw_fatal_screen<D: FaceDrawTarget<E>, E>(display: &mut D, error: &FaceError) {
    let bounds = display.bounding_box();
    let layout = FatalLayout::new(bounds);

    let _ = display.fill_solid(&bounds, COLOR_FATAL);

    // Stopped clock: two hands at twelve and three
    let style = PrimitiveStyle::with_stroke(COLOR_FATAL_TEXT, 4);
    let _ = Line::new(layout.hub, layout.hub - Point::new(0, layout.hand))
        .into_styled(style)
        .draw(display);
    let _ = Line::new(layout.hub, layout.hub + Point::new(layout.hand * 3 / 4, 0))
        .into_styled(style)
        .draw(display);

    let _ = TINY_FONT.render_aligned(
        env!("CARGO_PKG_VERSION"),
        layout.version,
        VerticalPosition::Top,
        HorizontalAlignment::Center,
        FontColor::WithBackground {
            fg: COLOR_VERSION,
            bg: Rgb565::BLACK,
        },
        display,
    );

    let _ = SMALL_FONT.render_aligned(
        " FATAL ERROR ",
        layout.title,
        VerticalPosition::Top,
        HorizontalAlignment::Center,
        FontColor::WithBackground {
            fg: COLOR_FATAL,
            bg: Rgb565::BLACK,
        },
        display,
    );

    let mut message = String::<64>::new();
    let _ = uwrite!(message, "{}", *error);

    let character_style = U8g2TextStyle::new(TinyFont {}, COLOR_FATAL_TEXT);
    let textbox_style = TextBoxStyleBuilder::new()
        .height_mode(HeightMode::FitToText)
        .alignment(embedded_text::alignment::HorizontalAlignment::Center)
        .build();
    let _ = TextBox::with_textbox_style(
        message.as_str(),
        layout.message,
        character_style,
        textbox_style,
    )
    .draw(display);

    display.hint_refresh();
}

/// Positions on the fatal screen, scaled to the display.
struct FatalLayout {
    hub: Point,
    hand: i32,
    version: Point,
    title: Point,
    message: Rectangle,
}

impl FatalLayout {
    fn new(bounds: Rectangle) -> Self {
        let Size { width, height } = bounds.size;
        let (w, h) = (width as i32, height as i32);
        let top = bounds.top_left;
        let cx = w / 2;
        let margin = w / 24;
        let message_y = h * 5 / 8;

        Self {
            hub: top + Point::new(cx, h / 5),
            hand: h / 10,
            version: top + Point::new(cx, h / 3),
            title: top + Point::new(cx, h * 5 / 12),
            message: Rectangle::new(
                top + Point::new(margin, message_y),
                Size::new(
                    width.saturating_sub(2 * margin as u32),
                    height.saturating_sub(message_y as u32),
                ),
            ),
        }
    }
}
