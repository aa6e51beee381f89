//! Blocking HTTP implementation of [`TaskApi`] on top of `ureq`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::{ClientError, ClientResult, TaskApi};
use crate::model::{Task, TaskDraft};

/// `/auth/login` response (minimal fields)
#[derive(Deserialize)]
struct LoginResponse {
    access_token: String,
}

/// Task server client
pub struct HttpClient {
    agent: ureq::Agent,
    base_url: String,
}

impl HttpClient {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .user_agent(concat!("taskpad/", env!("CARGO_PKG_VERSION")))
            .build();
        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

fn read_json<T: DeserializeOwned>(response: ureq::Response) -> ClientResult<T> {
    response
        .into_json()
        .map_err(|e| ClientError::Decode(e.to_string()))
}

impl From<ureq::Error> for ClientError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::Status(code, _) => ClientError::Status(code),
            ureq::Error::Transport(t) => ClientError::Transport(t.to_string()),
        }
    }
}

impl TaskApi for HttpClient {
    fn login(&self, username: &str, password: &str) -> ClientResult<String> {
        debug!(%username, "POST /auth/login");
        let response = self
            .agent
            .post(&self.url("/auth/login"))
            .send_form(&[("username", username), ("password", password)])?;
        let body: LoginResponse = read_json(response)?;
        Ok(body.access_token)
    }

    fn list_tasks(&self, token: &str) -> ClientResult<Vec<Task>> {
        debug!("GET /tasks");
        let response = self
            .agent
            .get(&self.url("/tasks"))
            .set("Authorization", &bearer(token))
            .call()?;
        read_json(response)
    }

    fn create_task(&self, token: &str, draft: &TaskDraft) -> ClientResult<Task> {
        debug!(title = %draft.title, "POST /tasks");
        let response = self
            .agent
            .post(&self.url("/tasks"))
            .set("Authorization", &bearer(token))
            .send_json(draft)?;
        read_json(response)
    }

    fn delete_task(&self, token: &str, id: i64) -> ClientResult<()> {
        debug!(id, "DELETE /tasks/{{id}}");
        self.agent
            .delete(&self.url(&format!("/tasks/{}", id)))
            .set("Authorization", &bearer(token))
            .call()?;
        Ok(())
    }

    fn update_task(&self, token: &str, id: i64, draft: &TaskDraft) -> ClientResult<Task> {
        debug!(id, title = %draft.title, "PUT /tasks/{{id}}");
        let response = self
            .agent
            .put(&self.url(&format!("/tasks/{}", id)))
            .set("Authorization", &bearer(token))
            .send_json(draft)?;
        read_json(response)
    }

    fn toggle_task(&self, token: &str, id: i64) -> ClientResult<Task> {
        debug!(id, "POST /tasks/{{id}}/toggle");
        let response = self
            .agent
            .post(&self.url(&format!("/tasks/{}/toggle", id)))
            .set("Authorization", &bearer(token))
            .call()?;
        read_json(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::{Arc, Mutex};

    use axum::extract::{Path, State};
    use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
    use axum::routing::{get, post, put};
    use axum::{Form, Json, Router};
    use serde_json::json;

    const TOKEN: &str = "tok-1";
    const PASSWORD: &str = "s3cret &=";

    type Db = Arc<Mutex<Vec<Task>>>;

    #[derive(Deserialize)]
    struct LoginForm {
        username: String,
        password: String,
    }

    #[derive(Deserialize)]
    struct DraftBody {
        title: String,
        description: String,
    }

    fn authorize(headers: &HeaderMap) -> Result<(), StatusCode> {
        match headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) {
            Some(value) if value == format!("Bearer {}", TOKEN) => Ok(()),
            _ => Err(StatusCode::UNAUTHORIZED),
        }
    }

    async fn login(Form(form): Form<LoginForm>) -> Result<Json<serde_json::Value>, StatusCode> {
        if form.username == "alice" && form.password == PASSWORD {
            Ok(Json(json!({ "access_token": TOKEN, "token_type": "bearer" })))
        } else {
            Err(StatusCode::UNAUTHORIZED)
        }
    }

    async fn list(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Vec<Task>>, StatusCode> {
        authorize(&headers)?;
        Ok(Json(db.lock().unwrap().clone()))
    }

    async fn create(
        State(db): State<Db>,
        headers: HeaderMap,
        Json(body): Json<DraftBody>,
    ) -> Result<Json<Task>, StatusCode> {
        authorize(&headers)?;
        let mut tasks = db.lock().unwrap();
        let task = Task {
            id: tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1,
            title: body.title,
            description: body.description,
            completed: false,
        };
        tasks.push(task.clone());
        Ok(Json(task))
    }

    async fn update(
        State(db): State<Db>,
        headers: HeaderMap,
        Path(id): Path<i64>,
        Json(body): Json<DraftBody>,
    ) -> Result<Json<Task>, StatusCode> {
        authorize(&headers)?;
        let mut tasks = db.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StatusCode::NOT_FOUND)?;
        task.title = body.title;
        task.description = body.description;
        Ok(Json(task.clone()))
    }

    async fn remove(
        State(db): State<Db>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<StatusCode, StatusCode> {
        authorize(&headers)?;
        let mut tasks = db.lock().unwrap();
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(StatusCode::NOT_FOUND);
        }
        Ok(StatusCode::NO_CONTENT)
    }

    async fn toggle(
        State(db): State<Db>,
        headers: HeaderMap,
        Path(id): Path<i64>,
    ) -> Result<Json<Task>, StatusCode> {
        authorize(&headers)?;
        let mut tasks = db.lock().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StatusCode::NOT_FOUND)?;
        task.completed = !task.completed;
        Ok(Json(task.clone()))
    }

    fn task_router(db: Db) -> Router {
        Router::new()
            .route("/auth/login", post(login))
            .route("/tasks", get(list).post(create))
            .route("/tasks/{id}", put(update).delete(remove))
            .route("/tasks/{id}/toggle", post(toggle))
            .with_state(db)
    }

    /// 在后台线程启动 axum 服务，返回 base URL
    fn spawn_server(router: Router) -> String {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.set_nonblocking(true).unwrap();
        let addr = listener.local_addr().unwrap();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, router).await.unwrap();
            });
        });

        format!("http://{}", addr)
    }

    fn seeded() -> (HttpClient, Db) {
        let db: Db = Arc::new(Mutex::new(vec![Task {
            id: 1,
            title: "first".to_string(),
            description: "seed".to_string(),
            completed: false,
        }]));
        let url = spawn_server(task_router(db.clone()));
        (HttpClient::new(&url), db)
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = HttpClient::new("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(client.url("/tasks"), "http://localhost:8000/tasks");
    }

    #[test]
    fn test_login_sends_form_and_reads_token() {
        let (client, _db) = seeded();
        assert_eq!(client.login("alice", PASSWORD).unwrap(), TOKEN);
        assert_eq!(
            client.login("alice", "wrong").unwrap_err(),
            ClientError::Status(401)
        );
    }

    #[test]
    fn test_task_crud_round() {
        let (client, db) = seeded();

        let tasks = client.list_tasks(TOKEN).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "first");

        let created = client
            .create_task(TOKEN, &TaskDraft::new("A", "B"))
            .unwrap();
        assert_eq!(created.id, 2);
        assert_eq!(created.title, "A");
        assert_eq!(created.description, "B");
        assert!(!created.completed);

        let toggled = client.toggle_task(TOKEN, 2).unwrap();
        assert!(toggled.completed);

        let updated = client
            .update_task(TOKEN, 2, &TaskDraft::new("A2", "B2"))
            .unwrap();
        assert_eq!(updated.title, "A2");
        assert!(updated.completed);

        client.delete_task(TOKEN, 1).unwrap();
        let remaining: Vec<i64> = db.lock().unwrap().iter().map(|t| t.id).collect();
        assert_eq!(remaining, vec![2]);
    }

    #[test]
    fn test_bad_token_and_missing_task() {
        let (client, _db) = seeded();
        assert_eq!(
            client.list_tasks("expired").unwrap_err(),
            ClientError::Status(401)
        );
        assert_eq!(
            client.toggle_task(TOKEN, 99).unwrap_err(),
            ClientError::Status(404)
        );
        assert_eq!(
            client.delete_task(TOKEN, 99).unwrap_err(),
            ClientError::Status(404)
        );
    }

    #[test]
    fn test_unexpected_body_is_decode_error() {
        let router = Router::new().route("/auth/login", post(|| async { "ok" }));
        let client = HttpClient::new(&spawn_server(router));
        assert!(matches!(
            client.login("alice", PASSWORD),
            Err(ClientError::Decode(_))
        ));
    }

    #[test]
    fn test_unreachable_server_is_transport_error() {
        // 绑定后立即释放，得到一个没有监听者的端口
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let client = HttpClient::new(&format!("http://{}", addr));
        assert!(matches!(
            client.list_tasks(TOKEN),
            Err(ClientError::Transport(_))
        ));
    }
}
