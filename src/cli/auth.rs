use std::io::{self, BufRead, Write};

use crate::{
    eduflex::auth,
    error, info, success,
    types::{ProfileUpdate, Registration, User},
    warning,
};

use super::{anonymous_client, client, fail};

pub async fn login(email: String, password: Option<String>) {
    let password = password.unwrap_or_else(|| prompt("Password"));
    let client = anonymous_client().await;

    match auth::login(&client, &email, &password).await {
        Ok(user) => success!("Signed in as {} <{}>", user.username, user.email),
        Err(e) if e.is_session_expired() => error!("Login failed: invalid email or password."),
        Err(e) => fail("Login failed", e),
    }
}

pub async fn register(email: String, username: String, password: Option<String>) {
    let (password, password2) = match password {
        Some(p) => (p.clone(), p),
        None => (prompt("Password"), prompt("Repeat password")),
    };
    let client = anonymous_client().await;

    let registration = Registration {
        email,
        username,
        password,
        password2,
    };

    match auth::register(&client, &registration).await {
        Ok(user) => success!("Account created. Signed in as {} <{}>", user.username, user.email),
        Err(e) => fail("Registration failed", e),
    }
}

pub async fn logout() {
    let client = client().await;
    if !client.has_access_token().await {
        info!("Not signed in.");
        return;
    }

    auth::logout(&client).await;
    success!("Signed out.");
}

pub async fn whoami() {
    let client = client().await;

    match auth::restore_session(&client).await {
        Ok(Some(user)) => print_user(&user),
        Ok(None) => warning!("Not signed in. Run eduflexcli login"),
        Err(e) => fail("Cannot validate session", e),
    }
}

pub async fn update_profile(username: Option<String>, bio: Option<String>) {
    if username.is_none() && bio.is_none() {
        warning!("Nothing to update. Pass --username and/or --bio.");
        return;
    }

    let client = client().await;
    let update = ProfileUpdate { username, bio };

    match auth::update_profile(&client, &update).await {
        Ok(user) => {
            success!("Profile updated.");
            print_user(&user);
        }
        Err(e) => fail("Profile update failed", e),
    }
}

pub async fn become_creator() {
    let client = client().await;

    match auth::become_creator(&client).await {
        Ok(upgrade) => {
            if upgrade.message.is_empty() {
                success!("You are now a creator.");
            } else {
                success!("{}", upgrade.message);
            }
            print_user(&upgrade.user);
        }
        Err(e) => fail("Upgrade failed", e),
    }
}

fn print_user(user: &User) {
    info!("{} <{}>", user.username, user.email);
    info!("Role: {}", user.role);
    if !user.bio.is_empty() {
        info!("Bio: {}", user.bio);
    }
    if let Some(joined) = user.created_at {
        info!("Member since {}", joined.format("%Y-%m-%d"));
    }
}

fn prompt(label: &str) -> String {
    print!("{}: ", label);
    if let Err(e) = io::stdout().flush() {
        error!("Cannot write prompt. Err: {}", e);
    }

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(_) => line.trim_end_matches(['\r', '\n']).to_string(),
        Err(e) => error!("Cannot read {}. Err: {}", label.to_lowercase(), e),
    }
}
