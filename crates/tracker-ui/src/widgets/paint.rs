//! Drawing helpers shared by the widgets.

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::{DrawTarget, Primitive};
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle, Rectangle, Triangle};
use embedded_graphics::text::{Baseline, Text};

use crate::color::Color;
use crate::geometry::{Point, Rect};
use crate::string::UiString;
use crate::widgets::text::Font;

pub(crate) fn fill<D>(g: &mut D, rect: Rect, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if rect.is_empty() {
        return Ok(());
    }
    Rectangle::from(rect)
        .into_styled(PrimitiveStyle::with_fill(color.into()))
        .draw(g)
}

pub(crate) fn outline<D>(g: &mut D, rect: Rect, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if rect.is_empty() {
        return Ok(());
    }
    Rectangle::from(rect)
        .into_styled(PrimitiveStyle::with_stroke(color.into(), 1))
        .draw(g)
}

pub(crate) fn line<D>(g: &mut D, from: Point, to: Point, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Line::new(from.into(), to.into())
        .into_styled(PrimitiveStyle::with_stroke(color.into(), 1))
        .draw(g)
}

/// Raised (or, when `sunken`, lowered) edges around `rect`.
pub(crate) fn bevel<D>(g: &mut D, rect: Rect, face: Color, sunken: bool) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if rect.width() < 2 || rect.height() < 2 {
        return Ok(());
    }
    let (light, dark) = if sunken {
        (face.shadow(), face.highlight())
    } else {
        (face.highlight(), face.shadow())
    };
    let (x1, y1, x2, y2) = (rect.x1, rect.y1, rect.x2 - 1, rect.y2 - 1);
    line(g, Point::new(x1, y1), Point::new(x2, y1), light)?;
    line(g, Point::new(x1, y1), Point::new(x1, y2), light)?;
    line(g, Point::new(x1, y2), Point::new(x2, y2), dark)?;
    line(g, Point::new(x2, y1), Point::new(x2, y2), dark)
}

pub(crate) fn triangle<D>(g: &mut D, points: [Point; 3], color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    Triangle::new(points[0].into(), points[1].into(), points[2].into())
        .into_styled(PrimitiveStyle::with_fill(color.into()))
        .draw(g)
}

pub(crate) fn circle<D>(
    g: &mut D,
    top_left: Point,
    diameter: u32,
    color: Color,
    filled: bool,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let style = if filled {
        PrimitiveStyle::with_fill(color.into())
    } else {
        PrimitiveStyle::with_stroke(color.into(), 1)
    };
    Circle::new(top_left.into(), diameter).into_styled(style).draw(g)
}

/// Draw `text` with its top-left corner at `at`.
pub(crate) fn text<D>(
    g: &mut D,
    text: &UiString,
    at: Point,
    font: Font,
    color: Color,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    if text.is_empty() {
        return Ok(());
    }
    let style = MonoTextStyle::new(font.mono(), color.into());
    let content = text.to_str_lossy();
    Text::with_baseline(&content, at.into(), style, Baseline::Top).draw(g)?;
    Ok(())
}
