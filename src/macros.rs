// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand:
    //   s!()      -> String::new()
    //   s!(expr)  -> String::from(expr)
    () => {
        ::std::string::String::new()
    };
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // Concatenate string-ish pieces into one String.
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            s.push_str($rest);
        )+
        s
    }};
}

#[macro_export]
macro_rules! paint {
    // Wrap formatted text in an ANSI SGR code and reset afterwards:
    //   paint!("1;35", "{}", name)
    ($sgr:expr, $($arg:tt)*) => {
        format!("\x1b[{}m{}\x1b[0m", $sgr, format!($($arg)*))
    };
}
