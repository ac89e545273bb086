/// Append-only, user facing run log.
pub trait LogSink {
    fn log(&mut self, message: &str);
}

impl<F: FnMut(&str)> LogSink for F {
    fn log(&mut self, message: &str) {
        (*self)(message)
    }
}

impl LogSink for Vec<String> {
    fn log(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_closure_when_logging_then_receives_message() {
        let mut seen = String::new();
        {
            let mut sink = |m: &str| seen.push_str(m);
            sink.log("hello");
        }

        assert_eq!(seen, "hello");
    }

    #[test]
    fn given_vec_when_logging_then_appends_in_order() {
        let mut sink: Vec<String> = Vec::new();

        sink.log("one");
        sink.log("two");

        assert_eq!(sink, vec!["one", "two"]);
    }
}
