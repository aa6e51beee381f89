use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use ratatui::widgets::TableState;
use tracing::{debug, warn};

use crate::client::{ClientResult, TaskApi};
use crate::error::{AppError, Result};
use crate::session::SessionContext;
use crate::storage::config;
use crate::sync::{Confirmed, Request, TaskList};
use crate::theme::{detect_system_theme, get_theme_colors, Theme, ThemeColors};
use crate::ui::components::confirm_dialog::ConfirmType;

/// Toast 消息
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub expires_at: Instant,
}

impl Toast {
    pub fn new(message: impl Into<String>, duration: Duration) -> Self {
        Self {
            message: message.into(),
            expires_at: Instant::now() + duration,
        }
    }

    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// 当前页面
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Tasks,
}

/// 登录表单输入框
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// 登录页面状态
#[derive(Debug, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// 登录页错误提示
    pub error: Option<String>,
    /// 登录请求进行中
    pub submitting: bool,
}

impl LoginForm {
    /// 当前聚焦的输入框
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    pub fn switch_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }
}

/// 任务表单（新建弹窗 / 行内编辑）的输入框
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Description,
}

impl FormField {
    pub fn toggle(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Title,
        }
    }
}

/// 后台请求结果
#[derive(Debug)]
pub enum BgResult {
    Login {
        username: String,
        result: ClientResult<String>,
    },
    Task(Result<Confirmed>),
}

/// 带会话代号的后台结果；代号过期的结果直接丢弃
#[derive(Debug)]
struct BgMessage {
    generation: u64,
    result: BgResult,
}

/// 全局应用状态
pub struct App {
    /// 是否应该退出
    pub should_quit: bool,
    /// 当前页面
    pub screen: Screen,
    pub session: SessionContext,
    api: Arc<dyn TaskApi>,
    /// 服务端地址（Header 显示用）
    pub server_url: String,
    /// 本地任务缓存
    pub tasks: TaskList,
    /// 列表选择状态
    pub table_state: TableState,
    pub login: LoginForm,
    /// New Task 弹窗（Some = 打开，值为聚焦的输入框）
    pub add_dialog: Option<FormField>,
    /// 行内编辑时聚焦的输入框
    pub edit_field: FormField,
    /// 确认弹窗
    pub confirm_dialog: Option<ConfirmType>,
    /// 是否显示帮助面板
    pub show_help: bool,
    /// Toast 提示
    pub toast: Option<Toast>,
    /// 当前主题
    pub theme: Theme,
    /// 当前颜色方案
    pub colors: ThemeColors,
    /// 上次检测到的系统主题（用于 Auto 模式检测变化）
    last_system_dark: bool,
    /// 后台结果通道
    bg_tx: mpsc::Sender<BgMessage>,
    bg_rx: mpsc::Receiver<BgMessage>,
    /// 会话代号，登出时递增
    generation: u64,
    /// 当前代号下进行中的请求数
    in_flight: usize,
    /// Loading 消息（后台请求进行中时显示）
    pub loading_message: Option<String>,
}

impl App {
    /// 创建应用；已登录则直接进入任务页并加载列表
    pub fn new(
        session: SessionContext,
        api: Arc<dyn TaskApi>,
        server_url: impl Into<String>,
        theme: Theme,
    ) -> Self {
        let (bg_tx, bg_rx) = mpsc::channel();
        let mut app = Self {
            should_quit: false,
            screen: Screen::Login,
            session,
            api,
            server_url: server_url.into(),
            tasks: TaskList::new(),
            table_state: TableState::default(),
            login: LoginForm::default(),
            add_dialog: None,
            edit_field: FormField::Title,
            confirm_dialog: None,
            show_help: false,
            toast: None,
            theme,
            colors: get_theme_colors(theme),
            last_system_dark: detect_system_theme(),
            bg_tx,
            bg_rx,
            generation: 0,
            in_flight: 0,
            loading_message: None,
        };

        if app.session.is_logged_in() {
            app.enter_tasks();
        }
        app
    }

    // ========== Session ==========

    /// 提交登录表单（后台线程请求，结果由 `finish_login` 处理）
    pub fn submit_login(&mut self) {
        if self.login.submitting {
            return;
        }
        self.login.error = None;

        let username = self.login.username.trim().to_string();
        if username.is_empty() || self.login.password.is_empty() {
            self.login.error = Some("username and password are required".to_string());
            return;
        }

        self.login.submitting = true;
        let password = self.login.password.clone();
        self.spawn("Signing in".to_string(), move |api| {
            let result = api.login(&username, &password);
            BgResult::Login { username, result }
        });
    }

    fn finish_login(&mut self, username: &str, result: ClientResult<String>) {
        self.login.submitting = false;
        match self.session.accept_login(username, result) {
            Ok(_) => {
                self.login.password.clear();
                self.login.focus = LoginField::Username;
                self.enter_tasks();
            }
            Err(e) => self.login.error = Some(e.to_string()),
        }
    }

    /// 进入任务页（受保护页面，无 token 则回到登录页）
    pub fn enter_tasks(&mut self) {
        if let Err(e) = self.session.require_session() {
            self.require_login(&e);
            return;
        }
        self.screen = Screen::Tasks;
        self.tasks.clear_error();
        self.spawn_request(Request::List);
    }

    /// 清除 token 并回到登录页（无确认）
    pub fn logout(&mut self) {
        if let Err(e) = self.session.logout() {
            warn!(error = %e, "failed to remove stored token");
        }
        self.reset_task_view();
        self.screen = Screen::Login;
        self.show_toast("Logged out");
    }

    /// 会话缺失：记录错误并跳转登录页
    fn require_login(&mut self, err: &AppError) {
        self.tasks.report(err);
        self.reset_task_view();
        self.login.error = Some(err.to_string());
        self.screen = Screen::Login;
    }

    /// 丢弃当前会话的缓存；仍在路上的请求结果不会再被应用
    fn reset_task_view(&mut self) {
        self.generation += 1;
        self.in_flight = 0;
        self.loading_message = None;
        self.login.submitting = false;
        self.tasks = TaskList::new();
        self.table_state = TableState::default();
        self.add_dialog = None;
        self.confirm_dialog = None;
    }

    // ========== Background requests ==========

    /// 在后台线程发送请求；结果由 `poll_bg_result` 按完成顺序应用
    pub fn spawn_request(&mut self, request: Request) {
        let token = match self.session.require_session() {
            Ok(token) => token,
            Err(e) => {
                self.require_login(&e);
                return;
            }
        };

        debug!(request = ?request, "spawning request");
        self.spawn(request.label(), move |api| {
            BgResult::Task(request.send(api, &token))
        });
    }

    /// 在后台线程执行 `job`，结果连同当前会话代号发回事件循环
    fn spawn<F>(&mut self, label: String, job: F)
    where
        F: FnOnce(&dyn TaskApi) -> BgResult + Send + 'static,
    {
        self.loading_message = Some(label);
        self.in_flight += 1;

        let api = Arc::clone(&self.api);
        let tx = self.bg_tx.clone();
        let generation = self.generation;
        thread::spawn(move || {
            let result = job(api.as_ref());
            let _ = tx.send(BgMessage { generation, result });
        });
    }

    /// 检查后台请求结果（非阻塞）
    pub fn poll_bg_result(&mut self) {
        while let Ok(message) = self.bg_rx.try_recv() {
            self.handle_bg_message(message);
        }
    }

    fn handle_bg_message(&mut self, message: BgMessage) {
        if message.generation != self.generation {
            debug!(
                generation = message.generation,
                current = self.generation,
                "dropping result from a previous session"
            );
            return;
        }

        self.in_flight = self.in_flight.saturating_sub(1);
        if self.in_flight == 0 {
            self.loading_message = None;
        }

        match message.result {
            BgResult::Login { username, result } => self.finish_login(&username, result),
            BgResult::Task(result) => self.apply_task_result(result),
        }
    }

    fn apply_task_result(&mut self, result: Result<Confirmed>) {
        match self.tasks.apply(result) {
            Ok(Confirmed::Listed(_)) => self.ensure_selection(),
            Ok(Confirmed::Added(task)) => {
                self.add_dialog = None;
                self.select_task(task.id);
                self.show_toast(format!("Added: {}", task.title));
            }
            Ok(Confirmed::Removed(id)) => {
                self.ensure_selection();
                self.show_toast(format!("Deleted #{}", id));
            }
            Ok(Confirmed::Updated(_, task)) => {
                self.show_toast(format!("Saved: {}", task.title));
            }
            Ok(Confirmed::Toggled(..)) => {}
            // 错误已写入 tasks 的错误槽
            Err(_) => {}
        }
    }

    // ========== Task actions ==========

    /// 重新加载列表
    pub fn reload(&mut self) {
        self.spawn_request(Request::List);
    }

    /// 打开 New Task 弹窗（保留上次未提交的输入）
    pub fn open_add_dialog(&mut self) {
        self.add_dialog = Some(FormField::Title);
    }

    pub fn close_add_dialog(&mut self) {
        self.add_dialog = None;
    }

    /// 提交 New Task 弹窗
    pub fn submit_add(&mut self) {
        if self.tasks.new_title.trim().is_empty() {
            self.show_toast("Title cannot be empty");
            return;
        }
        let request = self.tasks.add_request();
        self.spawn_request(request);
    }

    /// 选中行进入编辑
    pub fn begin_edit_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            if self.tasks.begin_edit(id) {
                self.edit_field = FormField::Title;
            }
        }
    }

    /// 保存选中行的编辑（成功后才退出编辑状态）
    pub fn save_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        if let Some(request) = self.tasks.save_request(id) {
            self.spawn_request(request);
        }
    }

    /// 放弃选中行的编辑
    pub fn cancel_edit_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.tasks.cancel_edit(id);
        }
    }

    /// 选中行是否处于编辑状态
    pub fn selected_is_editing(&self) -> bool {
        self.selected_task_id()
            .map(|id| self.tasks.is_editing(id))
            .unwrap_or(false)
    }

    /// 编辑中的行：当前聚焦的输入框
    pub fn edit_buffer_mut(&mut self) -> Option<&mut String> {
        let id = self.selected_task_id()?;
        let field = self.edit_field;
        let (title, description) = self.tasks.edit_buffers_mut(id)?;
        Some(match field {
            FormField::Title => title,
            FormField::Description => description,
        })
    }

    /// New Task 弹窗：当前聚焦的输入框
    pub fn add_buffer_mut(&mut self) -> Option<&mut String> {
        match self.add_dialog? {
            FormField::Title => Some(&mut self.tasks.new_title),
            FormField::Description => Some(&mut self.tasks.new_description),
        }
    }

    /// 切换选中任务的完成状态（以服务端返回为准）
    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected_task_id() {
            self.spawn_request(Request::Toggle(id));
        }
    }

    /// 请求删除选中任务（先弹确认）
    pub fn request_delete_selected(&mut self) {
        let Some(id) = self.selected_task_id() else {
            return;
        };
        let title = self
            .tasks
            .get(id)
            .map(|t| t.title.clone())
            .unwrap_or_default();
        self.confirm_dialog = Some(ConfirmType::DeleteTask { id, title });
    }

    /// 确认弹窗 - 确认
    pub fn confirm_dialog_accept(&mut self) {
        match self.confirm_dialog.take() {
            Some(ConfirmType::DeleteTask { id, .. }) => self.spawn_request(Request::Remove(id)),
            None => {}
        }
    }

    /// 确认弹窗 - 取消
    pub fn confirm_dialog_cancel(&mut self) {
        self.confirm_dialog = None;
    }

    // ========== Selection ==========

    pub fn selected_task_id(&self) -> Option<i64> {
        let index = self.table_state.selected()?;
        self.tasks.tasks().get(index).map(|t| t.id)
    }

    fn select_task(&mut self, id: i64) {
        if let Some(index) = self.tasks.tasks().iter().position(|t| t.id == id) {
            self.table_state.select(Some(index));
        }
    }

    /// 确保选中项有效（列表变化后调用）
    pub fn ensure_selection(&mut self) {
        let len = self.tasks.len();
        match self.table_state.selected() {
            _ if len == 0 => self.table_state.select(None),
            None => self.table_state.select(Some(0)),
            Some(i) if i >= len => self.table_state.select(Some(len - 1)),
            Some(_) => {}
        }
    }

    /// 选中下一项
    pub fn select_next(&mut self) {
        let len = self.tasks.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        self.table_state.select(Some((current + 1) % len));
    }

    /// 选中上一项
    pub fn select_previous(&mut self) {
        let len = self.tasks.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let prev = if current == 0 { len - 1 } else { current - 1 };
        self.table_state.select(Some(prev));
    }

    // ========== Theme / Toast ==========

    /// 切换到下一个主题并写入配置
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.colors = get_theme_colors(self.theme);

        let mut cfg = config::load_config();
        cfg.theme.name = self.theme.label().to_string();
        if let Err(e) = config::save_config(&cfg) {
            warn!(error = %e, "failed to save theme");
        }
        self.show_toast(format!("Theme: {}", self.theme.label()));
    }

    /// 检查系统主题变化（用于 Auto 模式）
    pub fn check_system_theme(&mut self) {
        if self.theme != Theme::Auto {
            return;
        }
        let current_dark = detect_system_theme();
        if current_dark != self.last_system_dark {
            self.last_system_dark = current_dark;
            self.colors = get_theme_colors(Theme::Auto);
        }
    }

    /// 显示 Toast 消息
    pub fn show_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, Duration::from_secs(2)));
    }

    /// 更新 Toast 状态（清理过期的 Toast）
    pub fn update_toast(&mut self) {
        if self.toast.as_ref().is_some_and(Toast::is_expired) {
            self.toast = None;
        }
    }

    /// 退出应用
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    use crate::client::fake::{FakeApi, GOOD_TOKEN};
    use crate::model::{Task, TaskDraft};
    use crate::storage::session::MemoryTokenStore;

    fn task(id: i64, title: &str) -> Task {
        Task {
            id,
            title: title.to_string(),
            description: String::new(),
            completed: false,
        }
    }

    impl App {
        /// 阻塞等待所有后台请求完成
        pub(crate) fn wait_idle(&mut self) {
            while self.in_flight > 0 {
                self.recv_one();
            }
        }

        /// 阻塞接收并处理一条后台结果（含已过期的结果）
        pub(crate) fn recv_one(&mut self) {
            let message = self
                .bg_rx
                .recv_timeout(Duration::from_secs(5))
                .expect("background request did not finish");
            self.handle_bg_message(message);
        }
    }

    pub(crate) fn app_with(token: Option<&str>, tasks: Vec<Task>) -> (App, Arc<FakeApi>) {
        let api = Arc::new(FakeApi::with_tasks(tasks));
        let store = match token {
            Some(t) => MemoryTokenStore::with_token(t),
            None => MemoryTokenStore::default(),
        };
        let mut app = App::new(
            SessionContext::new(store),
            api.clone(),
            "http://localhost:8000",
            Theme::Dark,
        );
        app.wait_idle();
        (app, api)
    }

    #[test]
    fn test_starts_on_login_without_token() {
        let (app, api) = app_with(None, vec![task(1, "a")]);
        assert_eq!(app.screen, Screen::Login);
        assert!(api.calls().is_empty());
    }

    #[test]
    fn test_starts_on_tasks_with_token() {
        let (app, _api) = app_with(Some(GOOD_TOKEN), vec![task(1, "a"), task(2, "b")]);
        assert_eq!(app.screen, Screen::Tasks);
        assert_eq!(app.tasks.len(), 2);
        assert_eq!(app.table_state.selected(), Some(0));
        assert_eq!(app.in_flight, 0);
        assert!(app.loading_message.is_none());
    }

    #[test]
    fn test_login_flow() {
        let (mut app, _api) = app_with(None, vec![task(1, "a")]);

        app.login.username = "alice".to_string();
        app.login.password = "wrong".to_string();
        app.submit_login();
        app.wait_idle();
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.login.submitting);
        assert_eq!(app.login.error.as_deref(), Some("login failed"));
        assert!(app.session.token().is_none());

        app.login.password = "secret".to_string();
        app.submit_login();
        app.wait_idle();
        assert_eq!(app.screen, Screen::Tasks);
        assert!(app.login.error.is_none());
        assert!(app.login.password.is_empty());
        assert_eq!(app.tasks.len(), 1);
    }

    #[test]
    fn test_login_requires_both_fields() {
        let (mut app, api) = app_with(None, vec![]);
        app.login.username = "alice".to_string();
        app.submit_login();
        assert!(app.login.error.is_some());
        assert!(api.calls().is_empty());
    }

    /// 登录请求卡在闸门上，直到测试放行
    struct GatedLogin {
        inner: FakeApi,
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl TaskApi for GatedLogin {
        fn login(&self, username: &str, password: &str) -> ClientResult<String> {
            let _ = self.gate.lock().unwrap().recv();
            self.inner.login(username, password)
        }
        fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>> {
            self.inner.list_tasks(token)
        }
        fn create_task(&self, token: &str, draft: &TaskDraft) -> ClientResult<Task> {
            self.inner.create_task(token, draft)
        }
        fn delete_task(&self, token: &str, id: i64) -> ClientResult<()> {
            self.inner.delete_task(token, id)
        }
        fn update_task(&self, token: &str, id: i64, draft: &TaskDraft) -> ClientResult<Task> {
            self.inner.update_task(token, id, draft)
        }
        fn toggle_task(&self, token: &str, id: i64) -> ClientResult<Task> {
            self.inner.toggle_task(token, id)
        }
    }

    #[test]
    fn test_pending_login_does_not_block_event_loop() {
        let (open_gate, gate) = mpsc::channel();
        let api = Arc::new(GatedLogin {
            inner: FakeApi::with_tasks(vec![task(1, "a")]),
            gate: Mutex::new(gate),
        });
        let mut app = App::new(
            SessionContext::new(MemoryTokenStore::default()),
            api,
            "http://localhost:8000",
            Theme::Dark,
        );

        app.login.username = "alice".to_string();
        app.login.password = "secret".to_string();
        // 服务端未响应时 submit_login 立即返回
        app.submit_login();
        assert!(app.login.submitting);
        assert_eq!(app.loading_message.as_deref(), Some("Signing in"));
        assert_eq!(app.screen, Screen::Login);

        // 进行中再次提交不会重复发请求
        app.submit_login();
        assert_eq!(app.in_flight, 1);

        app.poll_bg_result();
        assert_eq!(app.screen, Screen::Login);

        open_gate.send(()).unwrap();
        app.wait_idle();
        assert_eq!(app.screen, Screen::Tasks);
        assert!(!app.login.submitting);
        assert_eq!(app.tasks.len(), 1);
    }

    #[test]
    fn test_results_after_logout_are_dropped() {
        let (mut app, _api) = app_with(Some(GOOD_TOKEN), vec![task(1, "a"), task(2, "b")]);
        app.reload();
        app.logout();
        assert_eq!(app.in_flight, 0);
        assert!(app.loading_message.is_none());

        // 登出前发出的 list 结果晚到
        app.recv_one();
        assert_eq!(app.screen, Screen::Login);
        assert!(app.tasks.is_empty());
        assert!(app.tasks.error().is_none());

        // 新会话不受影响
        app.login.username = "alice".to_string();
        app.login.password = "secret".to_string();
        app.submit_login();
        app.wait_idle();
        assert_eq!(app.screen, Screen::Tasks);
        assert_eq!(app.tasks.len(), 2);
    }

    #[test]
    fn test_logout_then_protected_entry_redirects() {
        let (mut app, api) = app_with(Some(GOOD_TOKEN), vec![task(1, "a")]);
        app.logout();
        assert_eq!(app.screen, Screen::Login);
        assert!(app.tasks.is_empty());
        assert!(app.session.token().is_none());

        let calls = api.calls().len();
        app.enter_tasks();
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.login.error.as_deref(), Some("login required"));
        assert_eq!(api.calls().len(), calls);
    }

    #[test]
    fn test_add_dialog_submit() {
        let (mut app, _api) = app_with(Some(GOOD_TOKEN), vec![task(6, "old")]);
        app.open_add_dialog();
        app.add_buffer_mut().unwrap().push_str("A");
        app.add_dialog = Some(FormField::Description);
        app.add_buffer_mut().unwrap().push_str("B");
        app.submit_add();
        app.wait_idle();

        assert!(app.add_dialog.is_none());
        let last = app.tasks.tasks().last().unwrap();
        assert_eq!((last.id, last.title.as_str(), last.description.as_str()), (7, "A", "B"));
        assert_eq!(app.selected_task_id(), Some(7));
        assert!(app.tasks.new_title.is_empty());
    }

    #[test]
    fn test_add_failure_keeps_dialog_open() {
        let (mut app, api) = app_with(Some(GOOD_TOKEN), vec![]);
        app.open_add_dialog();
        app.tasks.new_title = "A".to_string();
        api.fail_next(500);
        app.submit_add();
        app.wait_idle();

        assert!(app.add_dialog.is_some());
        assert_eq!(app.tasks.new_title, "A");
        assert_eq!(app.tasks.error(), Some("failed to add task"));
    }

    #[test]
    fn test_delete_needs_confirmation() {
        let (mut app, api) = app_with(Some(GOOD_TOKEN), vec![task(1, "a"), task(2, "b")]);
        app.select_next();
        app.request_delete_selected();
        assert!(matches!(
            app.confirm_dialog,
            Some(ConfirmType::DeleteTask { id: 2, .. })
        ));
        assert!(!api.calls().iter().any(|c| c.starts_with("delete")));

        app.confirm_dialog_cancel();
        assert_eq!(app.tasks.len(), 2);

        app.request_delete_selected();
        app.confirm_dialog_accept();
        app.wait_idle();
        assert_eq!(app.tasks.len(), 1);
        assert_eq!(app.selected_task_id(), Some(1));
    }

    #[test]
    fn test_edit_save_and_cancel() {
        let (mut app, _api) = app_with(Some(GOOD_TOKEN), vec![task(1, "a")]);
        app.begin_edit_selected();
        assert!(app.selected_is_editing());
        app.edit_buffer_mut().unwrap().push_str("bc");
        app.save_selected();
        app.wait_idle();
        assert!(!app.selected_is_editing());
        assert_eq!(app.tasks.get(1).unwrap().title, "abc");

        app.begin_edit_selected();
        app.edit_buffer_mut().unwrap().clear();
        app.cancel_edit_selected();
        assert!(!app.selected_is_editing());
        assert_eq!(app.tasks.get(1).unwrap().title, "abc");
    }

    #[test]
    fn test_toggle_selected() {
        let (mut app, _api) = app_with(Some(GOOD_TOKEN), vec![task(1, "a")]);
        app.toggle_selected();
        app.wait_idle();
        assert!(app.tasks.get(1).unwrap().completed);
    }

    #[test]
    fn test_token_removed_mid_session_redirects() {
        let (mut app, api) = app_with(Some(GOOD_TOKEN), vec![task(1, "a")]);
        app.session.logout().unwrap();
        let calls = api.calls().len();

        app.toggle_selected();
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(api.calls().len(), calls);
    }

    #[test]
    fn test_selection_wraps() {
        let (mut app, _api) = app_with(Some(GOOD_TOKEN), vec![task(1, "a"), task(2, "b")]);
        app.select_previous();
        assert_eq!(app.selected_task_id(), Some(2));
        app.select_next();
        assert_eq!(app.selected_task_id(), Some(1));
    }
}
