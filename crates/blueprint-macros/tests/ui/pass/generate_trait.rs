use blueprint::generate;

#[generate(converter, partial)]
pub trait Temperature {
    #[validate(greater_than = -273.15)]
    fn celsius(&self) -> f64;
    fn set_celsius(&mut self, celsius: f64);

    #[derived(celsius * 1.8 + 32.0)]
    fn fahrenheit(&self) -> f64;
}

fn describe(reading: &dyn Temperature) -> String {
    format!("{:.1}", reading.celsius())
}

fn main() {
    let reading = TemperatureSubclassBuilder::with_celsius(20.0).build().unwrap();

    assert_eq!(describe(&reading), "20.0");
    assert_eq!(reading.fahrenheit(), 68.0);
}
