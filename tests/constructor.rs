#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_receives_constructor_arguments is OK
        r#"
            class Foo {
                init(a, b) {
                    print "init";
                    print a;
                    print b;
                }
            }
            Foo(1, 2);
        "# => "init", "1", "2"
    }

    tests! {
        default_constructor_takes_no_arguments is OK
        r#"
            class Foo {}
            print Foo();
        "# => "Foo instance"
    }

    tests! {
        default_constructor_rejects_arguments is ERR
        r#"
            class Foo {}
            Foo(1, 2, 3);
        "# => "Expected 0 arguments but got 3"
    }

    tests! {
        wrong_arity_is_an_error is ERR
        r#"
            class Foo {
                init(a, b) {}
            }
            Foo(1);
        "# => "Expected 2 arguments but got 1"
    }

    tests! {
        bare_return_inside_init_returns_this is OK
        r#"
            class Foo {
                init() {
                    print "init";
                    return;
                    print "unreachable";
                }
            }
            print Foo();
        "# => "init", "Foo instance"
    }

    tests! {
        returning_a_value_from_init_is_a_compile_error is ERR
        r#"
            class Foo {
                init() { return 1; }
            }
        "# => "Can't return a value from an initializer"
    }

    tests! {
        init_can_be_called_directly_and_returns_this is OK
        r#"
            class Foo {
                init(arg) { print arg; }
            }
            var foo = Foo("one");
            print foo.init("two") == foo;
        "# => "one", "two", "true"
    }

    tests! {
        method_named_init_on_a_non_init_call_site_still_behaves_normally is OK
        r#"
            class Foo {
                init() { this.value = "set by init"; }
            }
            var foo = Foo();
            print foo.value;
        "# => "set by init"
    }
}
