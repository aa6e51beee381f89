//! 主题颜色定义

use ratatui::style::Color;

use super::ThemeColors;

/// 深色主题（默认）
pub fn dark_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(24, 24, 24),           // 深灰背景
        bg_secondary: Color::Rgb(48, 48, 48), // 选中行背景
        highlight: Color::Rgb(0, 255, 136),   // 亮绿色
        text: Color::White,
        muted: Color::Rgb(128, 128, 128),
        border: Color::Rgb(68, 68, 68),
        status_done: Color::Rgb(0, 200, 110),
        status_pending: Color::Rgb(255, 213, 79), // 黄色
        editing: Color::Rgb(100, 181, 246),       // 蓝色
        error: Color::Rgb(255, 85, 85),           // 红色
    }
}

/// 浅色主题
pub fn light_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(250, 250, 250),
        bg_secondary: Color::Rgb(230, 230, 230),
        highlight: Color::Rgb(0, 128, 68),
        text: Color::Rgb(30, 30, 30),
        muted: Color::Rgb(120, 120, 120),
        border: Color::Rgb(200, 200, 200),
        status_done: Color::Rgb(0, 150, 80),
        status_pending: Color::Rgb(200, 120, 0),
        editing: Color::Rgb(33, 150, 243),
        error: Color::Rgb(200, 50, 50),
    }
}

/// Nord
pub fn nord_colors() -> ThemeColors {
    ThemeColors {
        bg: Color::Rgb(46, 52, 64),
        bg_secondary: Color::Rgb(59, 66, 82),
        highlight: Color::Rgb(136, 192, 208),
        text: Color::Rgb(236, 239, 244),
        muted: Color::Rgb(129, 161, 193),
        border: Color::Rgb(76, 86, 106),
        status_done: Color::Rgb(163, 190, 140),
        status_pending: Color::Rgb(235, 203, 139),
        editing: Color::Rgb(94, 129, 172),
        error: Color::Rgb(191, 97, 106),
    }
}
