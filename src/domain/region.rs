/// 注册人所在地区
/// 下游服务商约定美国统一使用国家代码`US`
#[derive(Debug)]
pub struct Region(String);

impl Region {
    pub fn parse(s: &str) -> Region {
        if s == "United States" {
            Self("US".into())
        } else {
            Self(s.into())
        }
    }
}

impl AsRef<str> for Region {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
