//! Direct2D rendering for the note chrome

use std::collections::HashMap;

use windows::core::Error;
use windows::Win32::Foundation::{D2DERR_RECREATE_TARGET, HWND};
use windows::Win32::Graphics::Direct2D::Common::*;
use windows::Win32::Graphics::Direct2D::*;
use windows::Win32::Graphics::DirectWrite::*;
use windows::Win32::Graphics::Dxgi::Common::DXGI_FORMAT_UNKNOWN;

use selfnote::rect::Rect;
use selfnote::style::Color;

use super::dpi::DpiInfo;
use super::window::get_client_size;

/// Colour quantised to bytes for brush lookup
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct BrushKey {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

impl From<Color> for BrushKey {
    fn from(c: Color) -> Self {
        Self {
            r: (c.r * 255.0) as u8,
            g: (c.g * 255.0) as u8,
            b: (c.b * 255.0) as u8,
            a: (c.a * 255.0) as u8,
        }
    }
}

fn d2d_color(color: Color) -> D2D1_COLOR_F {
    D2D1_COLOR_F {
        r: color.r,
        g: color.g,
        b: color.b,
        a: color.a,
    }
}

fn d2d_rect(r: Rect) -> D2D_RECT_F {
    D2D_RECT_F {
        left: r.left,
        top: r.top,
        right: r.right,
        bottom: r.bottom,
    }
}

/// Paints the note chrome with Direct2D
///
/// Drawing coordinates are logical pixels; the target's DPI maps them.
pub struct Renderer {
    factory: ID2D1Factory,
    dwrite_factory: IDWriteFactory,
    render_target: Option<ID2D1HwndRenderTarget>,
    brush_cache: HashMap<BrushKey, ID2D1SolidColorBrush>,
    hwnd: HWND,
    dpi: DpiInfo,
}

impl Renderer {
    pub fn new(hwnd: HWND) -> Result<Self, Error> {
        let factory: ID2D1Factory =
            unsafe { D2D1CreateFactory(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)? };
        let dwrite_factory: IDWriteFactory =
            unsafe { DWriteCreateFactory(DWRITE_FACTORY_TYPE_SHARED)? };

        let dpi = DpiInfo::for_window(hwnd);
        log!("Renderer for {:?} at {} dpi", hwnd, dpi.dpi);

        // No target yet: the note starts hidden and may have no client area
        Ok(Self {
            factory,
            dwrite_factory,
            render_target: None,
            brush_cache: HashMap::new(),
            hwnd,
            dpi,
        })
    }

    /// `Ok(false)` while the note has no client area yet
    fn create_render_target(&mut self) -> Result<bool, Error> {
        let (width, height) = get_client_size(self.hwnd);
        log!("Creating note render target {}x{}", width, height);

        if width <= 0 || height <= 0 {
            return Ok(false);
        }

        let render_props = D2D1_RENDER_TARGET_PROPERTIES {
            r#type: D2D1_RENDER_TARGET_TYPE_DEFAULT,
            pixelFormat: D2D1_PIXEL_FORMAT {
                format: DXGI_FORMAT_UNKNOWN,
                alphaMode: D2D1_ALPHA_MODE_PREMULTIPLIED,
            },
            dpiX: self.dpi.dpi as f32,
            dpiY: self.dpi.dpi as f32,
            usage: D2D1_RENDER_TARGET_USAGE_NONE,
            minLevel: D2D1_FEATURE_LEVEL_DEFAULT,
        };

        let hwnd_props = D2D1_HWND_RENDER_TARGET_PROPERTIES {
            hwnd: self.hwnd,
            pixelSize: D2D_SIZE_U {
                width: width as u32,
                height: height as u32,
            },
            presentOptions: D2D1_PRESENT_OPTIONS_NONE,
        };

        self.brush_cache.clear();

        let target = unsafe {
            self.factory
                .CreateHwndRenderTarget(&render_props, &hwnd_props)
        }
        .inspect_err(|e| log!("CreateHwndRenderTarget failed: {:?}", e))?;

        self.render_target = Some(target);
        Ok(true)
    }

    fn ensure_render_target(&mut self) -> Result<bool, Error> {
        if self.render_target.is_some() {
            return Ok(true);
        }
        self.create_render_target()
    }

    /// Drop device resources so the next draw rebuilds them
    fn discard_render_target(&mut self) {
        self.render_target = None;
        self.brush_cache.clear();
    }

    /// The note moved to a monitor with another scale factor
    pub fn handle_dpi_change(&mut self, new_dpi: u32) {
        self.dpi = DpiInfo::new(new_dpi);
        self.discard_render_target();
    }

    /// Follow the client area after a grip resize
    pub fn handle_resize(&mut self) -> Result<(), Error> {
        let (width, height) = get_client_size(self.hwnd);
        if width <= 0 || height <= 0 {
            return Ok(());
        }
        if let Some(ref target) = self.render_target {
            unsafe {
                let size = D2D_SIZE_U {
                    width: width as u32,
                    height: height as u32,
                };
                target.Resize(&size)?;
            }
        }
        Ok(())
    }

    /// Palette colours repeat every frame, so brushes are cached per colour
    fn get_brush(&mut self, color: Color) -> Result<ID2D1SolidColorBrush, Error> {
        let key = BrushKey::from(color);

        if let Some(brush) = self.brush_cache.get(&key) {
            return Ok(brush.clone());
        }

        let target = self
            .render_target
            .as_ref()
            .ok_or_else(Error::from_win32)?;

        let brush = unsafe { target.CreateSolidColorBrush(&d2d_color(color), None)? };

        self.brush_cache.insert(key, brush.clone());
        Ok(brush)
    }

    pub fn dpi(&self) -> DpiInfo {
        self.dpi
    }

    /// `false` when there is nothing to draw into (hidden or zero-size note)
    pub fn begin_draw(&mut self) -> bool {
        match self.ensure_render_target() {
            Ok(true) => {}
            Ok(false) => return false,
            Err(e) => {
                log!("begin_draw: no render target: {:?}", e);
                return false;
            }
        }

        match self.render_target {
            Some(ref target) => {
                unsafe { target.BeginDraw() };
                true
            }
            None => false,
        }
    }

    /// End drawing; a lost device is recreated on the next frame
    pub fn end_draw(&mut self) -> Result<(), Error> {
        let Some(ref target) = self.render_target else {
            return Ok(());
        };
        match unsafe { target.EndDraw(None, None) } {
            Err(e) if e.code() == D2DERR_RECREATE_TARGET => {
                log!("end_draw: render target lost, will recreate");
                self.discard_render_target();
                Ok(())
            }
            other => other,
        }
    }

    pub fn clear(&self, color: Color) {
        if let Some(ref target) = self.render_target {
            unsafe {
                target.Clear(Some(&d2d_color(color)));
            }
        }
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) -> Result<(), Error> {
        let brush = self.get_brush(color)?;
        if let Some(ref target) = self.render_target {
            unsafe {
                target.FillRectangle(&d2d_rect(rect), &brush);
            }
        }
        Ok(())
    }

    /// Outline, used for the border and the save button frame
    pub fn draw_rect(&mut self, rect: Rect, color: Color, stroke_width: f32) -> Result<(), Error> {
        let brush = self.get_brush(color)?;
        if let Some(ref target) = self.render_target {
            unsafe {
                target.DrawRectangle(&d2d_rect(rect), &brush, stroke_width, None);
            }
        }
        Ok(())
    }

    /// Button backgrounds
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) -> Result<(), Error> {
        let brush = self.get_brush(color)?;
        let rounded = D2D1_ROUNDED_RECT {
            rect: d2d_rect(rect),
            radiusX: radius,
            radiusY: radius,
        };
        if let Some(ref target) = self.render_target {
            unsafe {
                target.FillRoundedRectangle(&rounded, &brush);
            }
        }
        Ok(())
    }

    /// Pin head
    pub fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Color) -> Result<(), Error> {
        let brush = self.get_brush(color)?;
        let ellipse = D2D1_ELLIPSE {
            point: D2D_POINT_2F { x: cx, y: cy },
            radiusX: radius,
            radiusY: radius,
        };
        if let Some(ref target) = self.render_target {
            unsafe {
                target.FillEllipse(&ellipse, &brush);
            }
        }
        Ok(())
    }

    /// Close cross, pin needle and grip ridges
    pub fn draw_line(
        &mut self,
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Color,
        stroke_width: f32,
    ) -> Result<(), Error> {
        let brush = self.get_brush(color)?;
        if let Some(ref target) = self.render_target {
            unsafe {
                target.DrawLine(
                    D2D_POINT_2F { x: x1, y: y1 },
                    D2D_POINT_2F { x: x2, y: y2 },
                    &brush,
                    stroke_width,
                    None,
                );
            }
        }
        Ok(())
    }

    /// Centred single-line label format (size in logical pixels)
    pub fn create_label_format(
        &self,
        font_family: &str,
        font_size: f32,
    ) -> Result<IDWriteTextFormat, Error> {
        let family: Vec<u16> = font_family
            .encode_utf16()
            .chain(std::iter::once(0))
            .collect();

        unsafe {
            let format = self.dwrite_factory.CreateTextFormat(
                windows::core::PCWSTR(family.as_ptr()),
                None,
                DWRITE_FONT_WEIGHT_REGULAR,
                DWRITE_FONT_STYLE_NORMAL,
                DWRITE_FONT_STRETCH_NORMAL,
                font_size,
                windows::core::w!("en-US"),
            )?;

            format.SetTextAlignment(DWRITE_TEXT_ALIGNMENT_CENTER)?;
            format.SetParagraphAlignment(DWRITE_PARAGRAPH_ALIGNMENT_CENTER)?;

            Ok(format)
        }
    }

    pub fn draw_text(
        &mut self,
        text: &str,
        format: &IDWriteTextFormat,
        rect: Rect,
        color: Color,
    ) -> Result<(), Error> {
        let brush = self.get_brush(color)?;
        let text_wide: Vec<u16> = text.encode_utf16().collect();

        if let Some(ref target) = self.render_target {
            unsafe {
                target.DrawText(
                    &text_wide,
                    format,
                    &d2d_rect(rect),
                    &brush,
                    D2D1_DRAW_TEXT_OPTIONS_NONE,
                    DWRITE_MEASURING_MODE_NATURAL,
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use windows::core::{w, PCWSTR};
    use windows::Win32::System::LibraryLoader::GetModuleHandleW;
    use windows::Win32::UI::WindowsAndMessaging::*;

    #[test]
    fn test_label_format_is_centred() {
        let hwnd = unsafe {
            CreateWindowExW(
                WINDOW_EX_STYLE(0),
                w!("STATIC"),
                PCWSTR::null(),
                WS_POPUP,
                0,
                0,
                100,
                100,
                None,
                None,
                GetModuleHandleW(None).unwrap(),
                None,
            )
            .unwrap()
        };
        let renderer = Renderer::new(hwnd).unwrap();

        let format = renderer.create_label_format("Segoe UI", 12.0).unwrap();
        unsafe {
            assert_eq!(format.GetTextAlignment(), DWRITE_TEXT_ALIGNMENT_CENTER);
            assert_eq!(format.GetParagraphAlignment(), DWRITE_PARAGRAPH_ALIGNMENT_CENTER);
            let _ = DestroyWindow(hwnd);
        }
    }
}
