pub const API_NAME: &str = "[CARCOMPARE-API]";
