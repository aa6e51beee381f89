//! login / logout / status 子命令

use std::io::{BufRead, Write};

use crate::client::TaskApi;
use crate::error::{AppError, Result};
use crate::session::SessionContext;

use super::prompt_line;

/// 交互式登录：用户名缺省时从 stdin 读取，密码用隐藏输入
pub fn login(
    session: &SessionContext,
    api: &dyn TaskApi,
    username: Option<String>,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<()> {
    let username = match username {
        Some(u) => u,
        None => prompt_line(input, out, "Username: ")?,
    };
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::invalid_data("username is required"));
    }

    let password = rpassword::prompt_password("Password: ")?;
    login_with(session, api, username, &password, out)
}

/// 用已知凭据登录并提示结果
pub fn login_with(
    session: &SessionContext,
    api: &dyn TaskApi,
    username: &str,
    password: &str,
    out: &mut impl Write,
) -> Result<()> {
    session.login(api, username, password)?;
    writeln!(out, "Logged in as {}", username)?;
    Ok(())
}

pub fn logout(session: &SessionContext, out: &mut impl Write) -> Result<()> {
    session.logout()?;
    writeln!(out, "Logged out")?;
    Ok(())
}

pub fn status(session: &SessionContext, server_url: &str, out: &mut impl Write) -> Result<()> {
    writeln!(out, "Server:  {}", server_url)?;
    let state = if session.is_logged_in() {
        "logged in"
    } else {
        "not logged in"
    };
    writeln!(out, "Session: {}", state)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::fake::{FakeApi, GOOD_TOKEN};
    use crate::storage::session::MemoryTokenStore;

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_login_with_good_credentials() {
        let session = SessionContext::new(MemoryTokenStore::default());
        let api = FakeApi::default();
        let mut out = Vec::new();

        login_with(&session, &api, "alice", "secret", &mut out).unwrap();
        assert_eq!(session.token().as_deref(), Some(GOOD_TOKEN));
        assert_eq!(output(out), "Logged in as alice\n");
    }

    #[test]
    fn test_login_with_bad_credentials_stores_nothing() {
        let session = SessionContext::new(MemoryTokenStore::default());
        let api = FakeApi::default();
        let mut out = Vec::new();

        let err = login_with(&session, &api, "alice", "nope", &mut out).unwrap_err();
        assert!(matches!(err, AppError::AuthFailure(_)));
        assert!(session.token().is_none());
        assert!(out.is_empty());
    }

    #[test]
    fn test_status_and_logout() {
        let session = SessionContext::new(MemoryTokenStore::with_token(GOOD_TOKEN));
        let mut out = Vec::new();
        status(&session, "http://localhost:8000", &mut out).unwrap();
        logout(&session, &mut out).unwrap();
        status(&session, "http://localhost:8000", &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("Session: logged in\n"));
        assert!(text.contains("Logged out\n"));
        assert!(text.ends_with("Session: not logged in\n"));
    }
}
