//! Login page markup.

const LOGIN_HEAD: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>Login - Dale Auth</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
        * { margin: 0; padding: 0; box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background: #282a36;
            color: #f8f8f2;
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            padding: 20px;
        }
        .login-container {
            background: #44475a;
            padding: 40px;
            border-radius: 12px;
            width: 100%;
            max-width: 400px;
            border: 1px solid #6272a4;
        }
        .logo {
            display: block;
            margin: 0 auto 30px;
            width: 150px;
            height: 150px;
            border-radius: 50%;
            border: 4px solid #bd93f9;
        }
        .title { text-align: center; margin-bottom: 30px; font-size: 24px; color: #bd93f9; }
        .form-group { margin-bottom: 20px; }
        label { display: block; margin-bottom: 8px; font-size: 14px; }
        input[type="text"], input[type="password"] {
            width: 100%;
            padding: 12px 16px;
            border: 2px solid #6272a4;
            border-radius: 8px;
            background: #282a36;
            color: #f8f8f2;
            font-size: 16px;
        }
        button {
            width: 100%;
            background: linear-gradient(135deg, #bd93f9, #ff79c6);
            color: #282a36;
            padding: 14px 20px;
            border: none;
            border-radius: 8px;
            cursor: pointer;
            font-size: 16px;
            font-weight: 600;
        }
        .error {
            background: #ff5555;
            padding: 12px 16px;
            border-radius: 8px;
            margin-bottom: 20px;
        }
        .footer { text-align: center; margin-top: 20px; color: #6272a4; font-size: 12px; }
    </style>
</head>
<body>
    <div class="login-container">
        <img src="/static/auth.png" alt="Dale Auth Logo" class="logo">
        <h1 class="title">Dale Auth</h1>
"#;

const LOGIN_FORM: &str = r#"        <form method="POST">
            <div class="form-group">
                <label for="username">Username</label>
                <input type="text" id="username" name="username" placeholder="Enter your username" required>
            </div>
            <div class="form-group">
                <label for="password">Password</label>
                <input type="password" id="password" name="password" placeholder="Enter your password" required>
            </div>
            <button type="submit">Sign In</button>
        </form>
        <div class="footer">Powered by Dale Auth System</div>
    </div>
</body>
</html>
"#;

/// Generic message shown for any failed login.
pub const LOGIN_ERROR: &str = "Invalid username or password";

/// Render the login page, optionally with an error banner.
pub fn render_login(error: Option<&str>) -> String {
    let mut html = String::with_capacity(LOGIN_HEAD.len() + LOGIN_FORM.len() + 128);
    html.push_str(LOGIN_HEAD);
    if let Some(error) = error.filter(|e| !e.is_empty()) {
        html.push_str("        <div class=\"error\">");
        html.push_str(&escape_html(error));
        html.push_str("</div>\n");
    }
    html.push_str(LOGIN_FORM);
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_banner_without_error() {
        let html = render_login(None);
        assert!(html.contains("<form method=\"POST\">"));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn banner_is_escaped() {
        let html = render_login(Some("<script>"));
        assert!(html.contains("<div class=\"error\">&lt;script&gt;</div>"));
    }
}
