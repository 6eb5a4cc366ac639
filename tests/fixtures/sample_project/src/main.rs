//! Sample Rust file for testing

fn main() {
    println!("Hello from sample project!");
}

fn helper_function() -> i32 {
    42
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_helper() {
        assert_eq!(helper_function(), 42);
    }
}
