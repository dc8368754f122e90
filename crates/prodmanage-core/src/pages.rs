//! Static page content and the navigation menu.

use std::fmt;

use crate::auth::Session;

pub const HOME_TITLE: &str = "Welcome to ProdManage";
pub const HOME_TAGLINE: &str = "Effortlessly manage your products with our all-in-one tool. \
                                Create, view, edit, and delete products, fast, simple, and reliable.";

/// Contact details shown on the contact page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactInfo {
    pub address: &'static str,
    pub email: &'static str,
    pub phone: &'static str,
}

pub const CONTACT: ContactInfo = ContactInfo {
    address: "123 React Street, UI City, CA 90210",
    email: "hello@prodmanage.com",
    phone: "+1 (555) 123-4567",
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavItem {
    Home,
    Products,
    Contact,
    Register,
    Login,
    /// Signed-in user's display name.
    User(String),
    Logout,
}

impl fmt::Display for NavItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Home => f.write_str("Home"),
            Self::Products => f.write_str("Products"),
            Self::Contact => f.write_str("Contact"),
            Self::Register => f.write_str("Register"),
            Self::Login => f.write_str("Login"),
            Self::User(name) => f.write_str(name),
            Self::Logout => f.write_str("Logout"),
        }
    }
}

/// Menu entries for the given session, left to right.
pub fn navigation(session: &Session) -> Vec<NavItem> {
    let mut items = vec![
        NavItem::Home,
        NavItem::Products,
        NavItem::Contact,
        NavItem::Register,
    ];
    match session.user() {
        Some(user) => {
            items.push(NavItem::User(user.name.clone()));
            items.push(NavItem::Logout);
        }
        None => items.push(NavItem::Login),
    }
    items
}

pub fn render_home() -> String {
    format!("{HOME_TITLE}\n\n{HOME_TAGLINE}\n")
}

pub fn render_contact() -> String {
    let ContactInfo {
        address,
        email,
        phone,
    } = CONTACT;
    format!("Contact Us\n\nAddress: {address}\nEmail:   {email}\nPhone:   {phone}\n")
}
