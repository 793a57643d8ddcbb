mod screen_tests;
