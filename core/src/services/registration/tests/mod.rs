mod manager_tests;
