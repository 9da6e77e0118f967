hbnb_core::declare_model! {
    /// A registered user (host or guest).
    User {
        email: String,
        password: String,
        first_name: String,
        last_name: String,
    }
}
