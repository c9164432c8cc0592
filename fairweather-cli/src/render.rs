//! Plain-text output for terminal use.

use fairweather_core::{
    ActivityProfile, ActivityRegistry, BasicRiskAssessment, EnhancedRiskAssessment, ForecastStep,
    Recommendation, TimeWindow,
};

pub fn print_activities(registry: &ActivityRegistry) {
    for p in registry.all() {
        let opt = &p.optimal_conditions;
        println!("{:<14} {}", p.id, p.name);
        if !p.description.is_empty() {
            println!("{:<14} {}", "", p.description);
        }
        println!(
            "{:<14} temp {}-{}°C | wind <= {} m/s | rain <= {}% | humidity <= {}% | visibility >= {}km",
            "",
            opt.temp_range.0,
            opt.temp_range.1,
            opt.max_wind,
            (opt.max_precipitation * 100.0).round(),
            opt.max_humidity,
            (opt.min_visibility / 1000.0).round()
        );
    }
}

pub fn print_assessment(a: &EnhancedRiskAssessment, profile: &ActivityProfile) {
    println!("# {} ({})\n", profile.name, profile.id);
    println!("Overall: {} risk | score {}/100\n", a.overall.as_str(), a.score);

    println!("## Factors\n");
    for (factor, f) in a.factors.iter() {
        println!(
            "- {:<13} {:>3}  {:<10} {}",
            factor.as_str(),
            f.score,
            f.status.as_str(),
            f.impact
        );
    }

    println!("\n## Recommendations\n");
    for r in &a.recommendations {
        println!("{}", recommendation_line(r));
    }

    if !a.best_time_windows.is_empty() {
        println!("\n## Best time windows\n");
        print_windows(&a.best_time_windows);
    }
}

pub fn print_basic(a: &BasicRiskAssessment) {
    println!("Overall: {} risk (points {})\n", a.overall.as_str(), a.risk_score);
    println!("{}\n", basic_factors_line(a));
    for r in &a.recommendations {
        println!("- {}", r);
    }
}

pub fn print_windows(windows: &[TimeWindow]) {
    if windows.is_empty() {
        println!("(no suitable windows in this forecast)");
        return;
    }
    for w in windows {
        println!(
            "- {} -> {} | score {} | {}",
            w.start.format("%Y-%m-%d %H:%M"),
            w.end.format("%H:%M"),
            w.score,
            w.reason
        );
    }
}

pub fn print_outlook(steps: &[ForecastStep]) {
    for step in steps {
        println!(
            "- {} | {:>5.1}°C {:<7} | {} risk",
            step.time.format("%Y-%m-%d %H:%M"),
            step.temp,
            step.trend.as_str(),
            step.risk.as_str()
        );
    }
}

fn recommendation_line(r: &Recommendation) -> String {
    match &r.action {
        Some(action) => format!("- [{}] {} -> {}", r.priority.as_str(), r.message, action),
        None => format!("- [{}] {}", r.priority.as_str(), r.message),
    }
}

fn basic_factors_line(a: &BasicRiskAssessment) -> String {
    format!(
        "temperature={} wind={} precipitation={} humidity={}",
        a.factors.temperature.as_str(),
        a.factors.wind.as_str(),
        a.factors.precipitation.as_str(),
        a.factors.humidity.as_str()
    )
}
