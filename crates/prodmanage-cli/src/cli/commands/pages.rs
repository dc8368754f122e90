use prodmanage_core::auth::AuthContext;
use prodmanage_core::pages;

pub fn home() {
    print!("{}", pages::render_home());
}

pub fn contact() {
    print!("{}", pages::render_contact());
}

pub fn nav(auth: &AuthContext) {
    let labels: Vec<String> = pages::navigation(auth.session())
        .iter()
        .map(ToString::to_string)
        .collect();
    println!("{}", labels.join(" | "));
}
