mod app;
mod cli;
mod client;
mod error;
mod event;
mod logging;
mod model;
mod session;
mod storage;
mod sync;
mod theme;
mod ui;

use std::io;
use std::panic;
use std::process;
use std::sync::Arc;

use clap::Parser;
use ratatui::DefaultTerminal;
use tracing::info;

use app::{App, Screen};
use cli::{Cli, Commands};
use client::HttpClient;
use error::AppError;
use logging::LogTarget;
use session::SessionContext;
use storage::config;
use theme::Theme;

/// 启动 TUI 界面
fn run_tui(server_url: &str, theme: Theme) -> io::Result<()> {
    let session = SessionContext::file_backed();
    let api = Arc::new(HttpClient::new(server_url));
    info!(server = %api.base_url(), "starting tui");

    // 初始化终端
    let mut terminal = ratatui::init();

    // 创建应用（已登录时直接加载列表）
    let mut app = App::new(session, api, server_url, theme);

    // 运行主循环
    let result = run(&mut terminal, &mut app);

    // 恢复终端
    ratatui::restore();

    result
}

fn main() {
    // Set up panic hook to restore terminal state on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    // 解析命令行参数
    let cli = Cli::parse();

    let cfg = config::load_config();
    let env_server = std::env::var(config::SERVER_ENV).ok();
    let server_url = config::resolve_server_url(cli.server.as_deref(), env_server.as_deref(), &cfg);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            logging::init(LogTarget::File);
            if let Err(e) = run_tui(&server_url, Theme::from_name(&cfg.theme.name)) {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
        command => {
            logging::init(LogTarget::Stderr);
            let session = SessionContext::file_backed();
            let api = HttpClient::new(&server_url);
            if let Err(e) = cli::execute(command, &session, &api, &server_url) {
                eprintln!("Error: {}", e);
                if matches!(e, AppError::SessionRequired) {
                    eprintln!("Run `taskpad login` first.");
                }
                process::exit(1);
            }
        }
    }
}

fn run(terminal: &mut DefaultTerminal, app: &mut App) -> io::Result<()> {
    loop {
        // 检查后台请求结果
        app.poll_bg_result();

        // 渲染界面
        terminal.draw(|frame| match app.screen {
            Screen::Login => ui::login::render(frame, app),
            Screen::Tasks => ui::tasks::render(frame, app),
        })?;

        // 处理事件
        if !event::handle_events(app)? {
            break;
        }
    }

    Ok(())
}
