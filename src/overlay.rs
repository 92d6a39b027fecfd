//! Celebration text overlay: message, pop-in animation and responsive sizing.

pub const ELEMENT_ID: &str = "birthday-text";
pub const MESSAGE: &str = "生日快乐！";

pub const POP_DURATION_MS: u32 = 800;
/// Overshoots slightly past full scale before settling.
pub const POP_EASING: &str = "cubic-bezier(0.25, 0.46, 0.45, 1.2)";
pub const POP_START_SCALE: f64 = 0.8;

pub const FONT_VIEWPORT_RATIO: f64 = 0.18;
pub const MIN_FONT_PX: f64 = 32.0;
pub const MAX_FONT_PX: f64 = 120.0;

/// Font size for the overlay at the given viewport width, clamped to
/// [`MIN_FONT_PX`, `MAX_FONT_PX`].
pub fn font_size_px(viewport_width: f64) -> f64 {
    if !viewport_width.is_finite() {
        return MAX_FONT_PX;
    }
    (viewport_width * FONT_VIEWPORT_RATIO).clamp(MIN_FONT_PX, MAX_FONT_PX)
}

/// Inline `style` value carrying the responsive font size.
pub fn font_size_style(viewport_width: f64) -> String {
    format!("font-size: {}px;", font_size_px(viewport_width))
}

/// Stylesheet injected alongside the overlay element.
pub fn stylesheet() -> String {
    format!(
        r#"
@keyframes smoothPop {{
  0% {{ transform: translate(-50%, -50%) scale({start}); opacity: 0; }}
  100% {{ transform: translate(-50%, -50%) scale(1); opacity: 1; }}
}}

#{id} {{
  position: fixed;
  top: 50%;
  left: 50%;
  transform: translate(-50%, -50%);
  color: #FF6B6B;
  -webkit-text-stroke: 2px #fff;
  text-shadow: 0 0 20px rgba(255, 107, 107, 0.4);
  animation: smoothPop {duration}ms {easing} forwards;
  z-index: 1000;
  font-family: 'Microsoft YaHei', sans-serif;
  white-space: nowrap;
  pointer-events: none;
  text-align: center;
  max-width: 95%;
  overflow: hidden;
  text-overflow: ellipsis;
}}

@media (max-width: 480px) {{
  #{id} {{
    -webkit-text-stroke: 1.5px #fff;
    text-shadow: 0 0 15px rgba(255, 107, 107, 0.4);
  }}
}}
"#,
        start = POP_START_SCALE,
        id = ELEMENT_ID,
        duration = POP_DURATION_MS,
        easing = POP_EASING,
    )
}
