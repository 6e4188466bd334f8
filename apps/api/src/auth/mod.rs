// Accounts and login. Passwords are Argon2id PHC strings; hashing runs on the blocking pool.

pub mod accounts;
pub mod handlers;
pub mod password;
