mod revocation_store_tests;
