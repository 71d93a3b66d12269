mod google_calendar_mock;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Basic functionality tests to ensure nothing is broken
// - google_calendar_mock: Mocking the Google Calendar fetch boundary
// - joiner_behavior: Poll loop behavior against mock sources and openers
