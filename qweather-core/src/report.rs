//! Report rendering for the two public lookup operations.
//!
//! `WeatherReporter` drives the whole pipeline (validate → resolve →
//! fetch → render) and is the presentation boundary: every failure is
//! converted to a user-readable string here, and nothing is thrown past
//! the two public operations. The strings themselves reproduce the
//! provider-facing templates verbatim, bullet prefixes and trailing
//! newlines included.

use tracing::warn;

use crate::config::Config;
use crate::error::{Result, WeatherError};
use crate::model::{LocationId, WeatherAlert, WeatherNow};
use crate::provider::WeatherSource;
use crate::provider::qweather::QWeatherClient;

/// Fixed reply for blank input; no request is made in that case.
const MSG_INVALID_CITY: &str = "请输入有效的城市名称";

/// Orchestrates the lookup pipeline for the two entry points.
#[derive(Debug)]
pub struct WeatherReporter {
    source: Box<dyn WeatherSource>,
}

impl WeatherReporter {
    pub fn new(source: Box<dyn WeatherSource>) -> Self {
        Self { source }
    }

    /// Reporter backed by the production QWeather client, keyed from config.
    ///
    /// Fails when no API key is configured; nothing is sent until a key
    /// exists.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;
        Ok(Self::new(Box::new(QWeatherClient::new(api_key))))
    }

    /// Realtime weather for a city, rendered as display text.
    pub async fn realtime_weather(&self, city: &str) -> String {
        match self.realtime_inner(city).await {
            Ok(report) => report,
            Err(err) => {
                log_failure("realtime weather", city, &err);
                render_weather_failure(city, &err)
            }
        }
    }

    /// Active weather warnings for a city, rendered as display text.
    pub async fn weather_warnings(&self, city: &str) -> String {
        match self.warnings_inner(city).await {
            Ok(report) => report,
            Err(err) => {
                log_failure("weather warnings", city, &err);
                render_warning_failure(city, &err)
            }
        }
    }

    async fn realtime_inner(&self, city: &str) -> Result<String> {
        let name = validated(city)?;
        let location = self.resolve(name).await?;
        let now = self.source.current_weather(&location).await?;
        Ok(render_weather_now(city, &now))
    }

    async fn warnings_inner(&self, city: &str) -> Result<String> {
        let name = validated(city)?;
        let location = self.resolve(name).await?;
        let alerts = self.source.active_warnings(&location).await?;
        Ok(render_warnings(city, &alerts))
    }

    /// Resolution failures of any cause render like an unknown city; the
    /// actual cause still reaches the log.
    async fn resolve(&self, city: &str) -> Result<LocationId> {
        match self.source.resolve_city(city).await {
            Ok(Some(location)) => Ok(location),
            Ok(None) => Err(WeatherError::CityNotFound { city: city.to_string() }),
            Err(err) => {
                warn!(%city, error = %err, "city lookup failed");
                Err(WeatherError::CityNotFound { city: city.to_string() })
            }
        }
    }
}

/// Trimmed city name, or the blank-input error. The trimmed form goes to
/// the provider; messages keep interpolating the input as given.
fn validated(city: &str) -> Result<&str> {
    let name = city.trim();
    if name.is_empty() {
        return Err(WeatherError::BlankCity);
    }
    Ok(name)
}

fn log_failure(operation: &str, city: &str, err: &WeatherError) {
    match err {
        // Expected outcomes; the swallowed-lookup case was already logged.
        WeatherError::BlankCity | WeatherError::CityNotFound { .. } => {}
        other => warn!(%city, operation, error = %other, "lookup failed"),
    }
}

fn render_weather_now(city: &str, now: &WeatherNow) -> String {
    format!(
        "{city}实时天气：\n\
         • 天气：{}\n\
         • 温度：{}°C\n\
         • 体感温度：{}°C\n\
         • 相对湿度：{}%\n\
         • {} {}级\n\
         • 更新时间：{}\n",
        now.text,
        now.temp,
        now.feels_like,
        now.humidity,
        now.wind_dir,
        now.wind_scale,
        now.obs_time,
    )
}

fn render_warnings(city: &str, alerts: &[WeatherAlert]) -> String {
    if alerts.is_empty() {
        return format!("{city}目前无天气预警信息");
    }

    let mut out = format!("{city}天气预警信息：\n");
    for alert in alerts {
        out.push_str(&format!(
            "• 预警类型：{}\n\
             • 预警级别：{}\n\
             • 预警详情：{}\n\
             • 发布时间：{}\n\n",
            alert.type_name, alert.level, alert.text, alert.pub_time,
        ));
    }
    out
}

fn render_weather_failure(city: &str, err: &WeatherError) -> String {
    match err {
        WeatherError::BlankCity => MSG_INVALID_CITY.to_string(),
        WeatherError::CityNotFound { .. } => {
            format!("找不到城市\"{city}\"的天气信息，请确保输入正确的中国城市名称")
        }
        WeatherError::ProviderStatus { .. } => "获取天气信息失败，请稍后重试".to_string(),
        other => format!("获取天气信息时发生错误：{other}"),
    }
}

fn render_warning_failure(city: &str, err: &WeatherError) -> String {
    match err {
        WeatherError::BlankCity => MSG_INVALID_CITY.to_string(),
        WeatherError::CityNotFound { .. } => {
            format!("找不到城市\"{city}\"的天气预警信息，请确保输入正确的中国城市名称")
        }
        WeatherError::ProviderStatus { .. } => "获取天气预警信息失败，请稍后重试".to_string(),
        other => format!("获取天气预警信息时发生错误：{other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    /// Per-scenario behavior of the fake source.
    #[derive(Debug)]
    enum Script {
        /// Any contact with the source fails the test.
        Untouchable,
        /// Resolution answers "no such city".
        CityUnknown,
        /// Resolution itself errors out.
        LookupBroken,
        Now(WeatherNow),
        NowStatus(&'static str),
        NowBroken,
        Warnings(Vec<WeatherAlert>),
        WarningsStatus(&'static str),
        WarningsBroken,
    }

    #[derive(Debug)]
    struct Scripted(Script);

    #[async_trait]
    impl WeatherSource for Scripted {
        async fn resolve_city(&self, _city: &str) -> Result<Option<LocationId>> {
            match &self.0 {
                Script::Untouchable => panic!("resolve_city must not be called"),
                Script::CityUnknown => Ok(None),
                Script::LookupBroken => Err(not_gzip()),
                _ => Ok(Some(LocationId::new("101010100"))),
            }
        }

        async fn current_weather(&self, _location: &LocationId) -> Result<WeatherNow> {
            match &self.0 {
                Script::Now(now) => Ok(now.clone()),
                Script::NowStatus(code) => {
                    Err(WeatherError::ProviderStatus { code: (*code).to_string() })
                }
                Script::NowBroken => Err(not_gzip()),
                other => panic!("unexpected current_weather call for {other:?}"),
            }
        }

        async fn active_warnings(&self, _location: &LocationId) -> Result<Vec<WeatherAlert>> {
            match &self.0 {
                Script::Warnings(alerts) => Ok(alerts.clone()),
                Script::WarningsStatus(code) => {
                    Err(WeatherError::ProviderStatus { code: (*code).to_string() })
                }
                Script::WarningsBroken => Err(WeatherError::MissingPayload("warning")),
                other => panic!("unexpected active_warnings call for {other:?}"),
            }
        }
    }

    /// Fake that records the city names the resolver is asked about and
    /// always answers "unknown city".
    #[derive(Debug)]
    struct Recording {
        seen: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl WeatherSource for Recording {
        async fn resolve_city(&self, city: &str) -> Result<Option<LocationId>> {
            self.seen.lock().expect("recording lock").push(city.to_string());
            Ok(None)
        }

        async fn current_weather(&self, _location: &LocationId) -> Result<WeatherNow> {
            panic!("unexpected current_weather call");
        }

        async fn active_warnings(&self, _location: &LocationId) -> Result<Vec<WeatherAlert>> {
            panic!("unexpected active_warnings call");
        }
    }

    fn reporter(script: Script) -> WeatherReporter {
        WeatherReporter::new(Box::new(Scripted(script)))
    }

    fn not_gzip() -> WeatherError {
        WeatherError::Decompress(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "not a gzip stream",
        ))
    }

    fn sample_now() -> WeatherNow {
        WeatherNow {
            text: "晴".into(),
            temp: "24".into(),
            feels_like: "26".into(),
            humidity: "40".into(),
            wind_dir: "东北风".into(),
            wind_scale: "3".into(),
            obs_time: "2025-08-25T10:00+08:00".into(),
        }
    }

    fn storm_alert() -> WeatherAlert {
        WeatherAlert {
            type_name: "暴雨".into(),
            level: "橙色".into(),
            text: "预计未来6小时内降雨量将达50毫米以上".into(),
            pub_time: "2025-08-25T09:00+08:00".into(),
        }
    }

    fn wind_alert() -> WeatherAlert {
        WeatherAlert {
            type_name: "大风".into(),
            level: "蓝色".into(),
            text: "预计未来24小时内将有大风".into(),
            pub_time: "2025-08-25T07:30+08:00".into(),
        }
    }

    #[tokio::test]
    async fn blank_city_is_rejected_before_any_request() {
        let reporter = reporter(Script::Untouchable);

        for city in ["", "   ", " \t\n"] {
            assert_eq!(reporter.realtime_weather(city).await, "请输入有效的城市名称");
            assert_eq!(reporter.weather_warnings(city).await, "请输入有效的城市名称");
        }
    }

    #[tokio::test]
    async fn unknown_city_renders_not_found_with_input_verbatim() {
        let reporter = reporter(Script::CityUnknown);

        assert_eq!(
            reporter.realtime_weather("火星市").await,
            "找不到城市\"火星市\"的天气信息，请确保输入正确的中国城市名称"
        );
        assert_eq!(
            reporter.weather_warnings("火星市").await,
            "找不到城市\"火星市\"的天气预警信息，请确保输入正确的中国城市名称"
        );
    }

    #[tokio::test]
    async fn lookup_failure_renders_like_an_unknown_city() {
        let reporter = reporter(Script::LookupBroken);

        assert_eq!(
            reporter.realtime_weather("北京").await,
            "找不到城市\"北京\"的天气信息，请确保输入正确的中国城市名称"
        );
        assert_eq!(
            reporter.weather_warnings("北京").await,
            "找不到城市\"北京\"的天气预警信息，请确保输入正确的中国城市名称"
        );
    }

    #[tokio::test]
    async fn lookup_uses_the_trimmed_name_but_messages_keep_the_input() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let reporter = WeatherReporter::new(Box::new(Recording { seen: Arc::clone(&seen) }));

        let out = reporter.realtime_weather(" 北京 ").await;

        assert_eq!(out, "找不到城市\" 北京 \"的天气信息，请确保输入正确的中国城市名称");
        assert_eq!(*seen.lock().expect("recording lock"), vec!["北京".to_string()]);
    }

    #[tokio::test]
    async fn realtime_report_renders_all_fields_in_template_order() {
        let reporter = reporter(Script::Now(sample_now()));

        let out = reporter.realtime_weather("北京").await;

        assert_eq!(
            out,
            "北京实时天气：\n\
             • 天气：晴\n\
             • 温度：24°C\n\
             • 体感温度：26°C\n\
             • 相对湿度：40%\n\
             • 东北风 3级\n\
             • 更新时间：2025-08-25T10:00+08:00\n"
        );
    }

    #[tokio::test]
    async fn realtime_provider_failure_renders_retry_message() {
        let reporter = reporter(Script::NowStatus("500"));

        let out = reporter.realtime_weather("北京").await;

        assert_eq!(out, "获取天气信息失败，请稍后重试");
        // The raw envelope code never leaks into user output.
        assert!(!out.contains("500"));
    }

    #[tokio::test]
    async fn realtime_transport_failure_renders_error_message() {
        let reporter = reporter(Script::NowBroken);

        let out = reporter.realtime_weather("北京").await;

        assert!(out.starts_with("获取天气信息时发生错误："));
        assert!(out.contains("not a gzip stream"));
    }

    #[tokio::test]
    async fn no_active_warnings_renders_the_quiet_message() {
        let reporter = reporter(Script::Warnings(Vec::new()));

        let out = reporter.weather_warnings("济南").await;

        assert_eq!(out, "济南目前无天气预警信息");
    }

    #[tokio::test]
    async fn warnings_render_one_block_per_alert_in_provider_order() {
        let reporter = reporter(Script::Warnings(vec![storm_alert(), wind_alert()]));

        let out = reporter.weather_warnings("济南").await;

        assert_eq!(
            out,
            "济南天气预警信息：\n\
             • 预警类型：暴雨\n\
             • 预警级别：橙色\n\
             • 预警详情：预计未来6小时内降雨量将达50毫米以上\n\
             • 发布时间：2025-08-25T09:00+08:00\n\
             \n\
             • 预警类型：大风\n\
             • 预警级别：蓝色\n\
             • 预警详情：预计未来24小时内将有大风\n\
             • 发布时间：2025-08-25T07:30+08:00\n\
             \n"
        );
    }

    #[tokio::test]
    async fn warning_provider_failure_renders_retry_message() {
        let reporter = reporter(Script::WarningsStatus("204"));

        let out = reporter.weather_warnings("济南").await;

        assert_eq!(out, "获取天气预警信息失败，请稍后重试");
    }

    #[tokio::test]
    async fn warning_fetch_failure_renders_error_message() {
        let reporter = reporter(Script::WarningsBroken);

        let out = reporter.weather_warnings("济南").await;

        assert!(out.starts_with("获取天气预警信息时发生错误："));
        assert!(out.contains("`warning` payload"));
    }
}
