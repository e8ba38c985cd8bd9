/// Weak syntactic email check applied before a profile update is sent.
///
/// A blank value (empty or whitespace only) means "leave the email alone"
/// and passes. Otherwise the value passes when it contains both an `@` and
/// a `.` anywhere; their position and order are not inspected.
pub fn validate_email(email: &str) -> bool {
    email.trim().is_empty() || (email.contains('@') && email.contains('.'))
}
