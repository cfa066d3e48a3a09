use alloc::borrow::Cow;

mod sealed {
    pub trait Sealed: Sized + 'static {}

    impl Sealed for bool {}
    impl Sealed for &'static str {}
    impl Sealed for String {}
}

/// 从环境变量读取值，未设置、为空或无法解析时回退到默认值
pub trait ParseFromEnv: sealed::Sealed {
    type Result: Sized + 'static;
    fn parse_from_env(key: &str, default: Self) -> Self::Result;
}

impl ParseFromEnv for bool {
    type Result = bool;
    #[inline]
    fn parse_from_env(key: &str, default: bool) -> bool {
        ::std::env::var(key)
            .ok()
            .map(|mut val| {
                let res = {
                    val.make_ascii_lowercase();
                    val.trim()
                };
                match res {
                    "true" | "1" => true,
                    "false" | "0" => false,
                    _ => default,
                }
            })
            .unwrap_or(default)
    }
}

impl ParseFromEnv for &'static str {
    type Result = Cow<'static, str>;
    #[inline]
    fn parse_from_env(key: &str, default: &'static str) -> Cow<'static, str> {
        match ::std::env::var(key) {
            Ok(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    // 如果 trim 后为空，使用默认值（不分配）
                    Cow::Borrowed(default)
                } else if trimmed.len() == value.len() {
                    Cow::Owned(value)
                } else {
                    Cow::Owned(trimmed.to_owned())
                }
            }
            Err(_) => Cow::Borrowed(default),
        }
    }
}

impl ParseFromEnv for String {
    type Result = String;
    #[inline]
    fn parse_from_env(key: &str, default: String) -> String {
        match ::std::env::var(key) {
            Ok(value) if !value.trim().is_empty() => value.trim().to_owned(),
            _ => default,
        }
    }
}

macro_rules! impl_parse_num_from_env {
    ($($ty:ty)*) => {
        $(
            impl sealed::Sealed for $ty {}
            impl ParseFromEnv for $ty {
                type Result = $ty;
                #[inline]
                fn parse_from_env(key: &str, default: $ty) -> $ty {
                    ::std::env::var(key).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
                }
            }
        )*
    };
}

impl_parse_num_from_env!(i8 u8 i16 u16 i32 u32 i64 u64 i128 u128 isize usize);

#[inline]
pub fn parse_from_env<T: ParseFromEnv>(key: &str, default: T) -> T::Result {
    ParseFromEnv::parse_from_env(key, default)
}
