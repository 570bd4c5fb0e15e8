use crate::bootstrap::AppContext;
use anyhow::Result;
use clap::ValueEnum;
use plantcare_core::settings::{FontSize, Settings, SettingsRepository, Theme};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FontSizeArg {
    Small,
    Normal,
    Large,
}

impl From<FontSizeArg> for FontSize {
    fn from(arg: FontSizeArg) -> Self {
        match arg {
            FontSizeArg::Small => FontSize::Small,
            FontSizeArg::Normal => FontSize::Normal,
            FontSizeArg::Large => FontSize::Large,
        }
    }
}

pub fn show(ctx: &AppContext) {
    print_settings(&ctx.settings().load());
}

pub fn set_theme(ctx: &AppContext, theme: ThemeArg) -> Result<()> {
    let theme = Theme::from(theme);
    let settings = ctx.settings().update(&|s: &mut Settings| s.theme = theme)?;
    print_settings(&settings);
    Ok(())
}

pub fn set_font_size(ctx: &AppContext, size: FontSizeArg) -> Result<()> {
    let size = FontSize::from(size);
    let settings = ctx
        .settings()
        .update(&|s: &mut Settings| s.font_size = size)?;
    print_settings(&settings);
    Ok(())
}

fn print_settings(settings: &Settings) {
    let scale = settings.font_size.scale();
    println!("theme: {}", settings.theme.as_str());
    println!(
        "font_size: {} (x{})",
        settings.font_size.as_str(),
        settings.font_size.multiplier()
    );
    println!("text sizes: {:.1} / {:.1} / {:.1}", scale.small, scale.normal, scale.large);
}
